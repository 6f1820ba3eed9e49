//! `OpenQASM` 2.0 emitter.

use std::fmt::Write;

use alsvin_ir::{Circuit, Instruction, InstructionKind};

/// Emit a circuit as `OpenQASM` 2.0 source.
///
/// Standard operations use the qelib names. The Pauli-based operations use
/// the documented extension forms `t_pauli("+XIZ");`, `s_pauli(..);`,
/// `z_pauli(..);` and `m_pauli("..") -> c[k];`, which [`crate::parse`]
/// accepts back.
pub fn emit(circuit: &Circuit) -> String {
    let mut out = String::new();
    out.push_str("OPENQASM 2.0;\n");
    out.push_str("include \"qelib1.inc\";\n\n");

    if circuit.num_qubits() > 0 {
        let _ = writeln!(out, "qreg q[{}];", circuit.num_qubits());
    }
    if circuit.num_clbits() > 0 {
        let _ = writeln!(out, "creg c[{}];", circuit.num_clbits());
    }
    if circuit.num_qubits() > 0 || circuit.num_clbits() > 0 {
        out.push('\n');
    }

    for inst in circuit.operations() {
        emit_instruction(&mut out, inst, circuit.num_qubits());
    }
    out
}

fn emit_instruction(out: &mut String, inst: &Instruction, num_qubits: usize) {
    match &inst.kind {
        InstructionKind::Gate(gate) => {
            let qubits = qubit_list(inst);
            match gate.angle() {
                Some(theta) => {
                    let _ = writeln!(out, "{}({}) {};", gate.name(), theta, qubits);
                }
                None => {
                    let _ = writeln!(out, "{} {};", gate.name(), qubits);
                }
            }
        }
        InstructionKind::Measure => {
            let _ = writeln!(
                out,
                "measure q[{}] -> c[{}];",
                inst.qubits[0].0, inst.clbits[0].0
            );
        }
        InstructionKind::Reset => {
            let _ = writeln!(out, "reset q[{}];", inst.qubits[0].0);
        }
        InstructionKind::Barrier => {
            if inst.qubits.is_empty() {
                // A bare barrier fences the whole register.
                let all: Vec<String> = (0..num_qubits).map(|q| format!("q[{q}]")).collect();
                let _ = writeln!(out, "barrier {};", all.join(","));
            } else {
                let _ = writeln!(out, "barrier {};", qubit_list(inst));
            }
        }
        InstructionKind::TPauli(op) => {
            let _ = writeln!(out, "t_pauli(\"{op}\");");
        }
        InstructionKind::SPauli(op) => {
            let _ = writeln!(out, "s_pauli(\"{op}\");");
        }
        InstructionKind::ZPauli(op) => {
            let _ = writeln!(out, "z_pauli(\"{op}\");");
        }
        InstructionKind::MPauli(op) => match inst.clbits.first() {
            Some(clbit) => {
                let _ = writeln!(out, "m_pauli(\"{op}\") -> c[{}];", clbit.0);
            }
            None => {
                let _ = writeln!(out, "m_pauli(\"{op}\");");
            }
        },
    }
}

fn qubit_list(inst: &Instruction) -> String {
    inst.qubits
        .iter()
        .map(|q| format!("q[{}]", q.0))
        .collect::<Vec<_>>()
        .join(",")
}
