#![allow(dead_code)]

use vm64k::lang::Line;
use vm64k::mach::{Event, Program, Runtime, Scalar, Vm};

/// Packs 16-bit words the way the machine reads them.
pub fn words(words: &[u16]) -> Vec<u8> {
    let mut bytes = vec![0; words.len() * 2];
    for (index, word) in words.iter().enumerate() {
        word.write(&mut bytes[index * 2..]);
    }
    bytes
}

pub fn assemble(source: &str) -> Vec<u8> {
    let lines: Vec<Line> = source.lines().map(Line::new).collect();
    match Program::assemble(&lines) {
        Ok(program) => program.bytes().to_vec(),
        Err(errors) => panic!("{:?}", errors),
    }
}

pub fn vm_with(program: &[u8]) -> Vm {
    let mut vm = Vm::new();
    vm.load(program);
    vm
}

pub fn exec(runtime: &mut Runtime) -> String {
    exec_n(runtime, 5000)
}

pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Errors(errors) => {
                for error in errors.iter() {
                    s.push_str(&format!("{}\n", error));
                }
            }
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
                    break;
                }
            }
            Event::Print(ps) => {
                s.push_str(&format!("{}\n", ps));
            }
            Event::Load(name) | Event::Save(name) => {
                s.push_str(&format!("FILE {}\n", name));
            }
        }
        match event {
            Event::Running => prev_running = true,
            _ => prev_running = false,
        }
    }
    s
}
