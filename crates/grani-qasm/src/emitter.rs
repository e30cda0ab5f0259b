//! QASM 2.0 emitter for serializing circuits.

use grani_ir::{Circuit, Instruction, InstructionKind, QubitId, StandardGate};

use crate::error::{EmitError, EmitResult};

/// Emit a circuit as QASM 2.0 source code.
///
/// Register declarations use the QASM2 style (`qreg q[n];` / `creg c[n];`)
/// and measurements use `measure q[i] -> c[i];`.
pub fn emit_qasm2(circuit: &Circuit) -> EmitResult<String> {
    let mut emitter = Qasm2Emitter::new();
    emitter.emit_circuit(circuit)
}

/// QASM 2.0 emitter.
struct Qasm2Emitter {
    output: String,
}

#[allow(clippy::unused_self)]
impl Qasm2Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) -> EmitResult<String> {
        // Header
        self.writeln("OPENQASM 2.0;");
        self.writeln("include \"qelib1.inc\";");
        self.writeln("");

        // Register declarations
        let num_qubits = circuit.num_qubits();
        if num_qubits > 0 {
            self.writeln(&format!("qreg q[{num_qubits}];"));
        }

        let num_clbits = circuit.num_clbits();
        if num_clbits > 0 {
            self.writeln(&format!("creg c[{num_clbits}];"));
        }

        if num_qubits > 0 || num_clbits > 0 {
            self.writeln("");
        }

        // Instructions
        for (_, instruction) in circuit.dag().topological_ops() {
            self.emit_instruction(instruction)?;
        }

        Ok(self.output.clone())
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> EmitResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let name = gate.name();
                let params = self.emit_gate_params(gate);
                let qubits = self.emit_qubits(&instruction.qubits);

                if params.is_empty() {
                    self.writeln(&format!("{name} {qubits};"));
                } else {
                    self.writeln(&format!("{name}({params}) {qubits};"));
                }
            }

            InstructionKind::Measure => {
                let q = instruction.qubits[0];
                let c = instruction
                    .clbits
                    .first()
                    .ok_or(EmitError::MissingClbit { qubit: q })?;
                self.writeln(&format!("measure q[{}] -> c[{}];", q.0, c.0));
            }

            InstructionKind::Barrier => {
                let qubits = self.emit_qubits(&instruction.qubits);
                if qubits.is_empty() {
                    self.writeln("barrier;");
                } else {
                    self.writeln(&format!("barrier {qubits};"));
                }
            }
        }

        Ok(())
    }

    fn emit_gate_params(&self, gate: &StandardGate) -> String {
        let params = gate.params();
        if params.is_empty() {
            String::new()
        } else {
            params
                .iter()
                .map(|p| self.emit_param(*p))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    fn emit_param(&self, value: f64) -> String {
        // Render common fractions of pi symbolically.
        let pi = std::f64::consts::PI;
        if (value - pi).abs() < 1e-10 {
            "pi".into()
        } else if (value - pi / 2.0).abs() < 1e-10 {
            "pi/2".into()
        } else if (value - pi / 4.0).abs() < 1e-10 {
            "pi/4".into()
        } else if (value + pi / 2.0).abs() < 1e-10 {
            "-pi/2".into()
        } else if (value + pi / 4.0).abs() < 1e-10 {
            "-pi/4".into()
        } else {
            format!("{value:.6}")
        }
    }

    fn emit_qubits(&self, qubits: &[QubitId]) -> String {
        qubits
            .iter()
            .map(|q| format!("q[{}]", q.0))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}
