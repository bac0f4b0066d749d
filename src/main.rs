//! lodestone XBoard chess engine

use lodestone::xboard::Protocol;

fn main() {
    println!("lodestone 0.1.0");

    let mut protocol = Protocol::new();
    protocol.run();
}
