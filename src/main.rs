//! # 64K VM
//!
//! Interactive terminal for the 64K virtual machine.
//!

fn main() {
    env_logger::init();
    vm64k::term::main();
}
