//! Expands a key once and round-trips two blocks through it.

use aes_core::{Aes128, Aes128Key};

fn main() {
    let key = Aes128Key::from(*b"sixteen byte key");
    let cipher = Aes128::new(&key);

    for block in [*b"first block here", *b"second blockhere"] {
        let ct = cipher.encrypt_block(&block);
        let pt = cipher.decrypt_block(&ct);
        assert_eq!(pt, block);
        println!("{:02x?}", ct);
    }

    println!("example succeeded; both blocks round-tripped");
}
