//! Recursive-descent parser for `OpenQASM` 2.0.

use std::f64::consts::{FRAC_PI_2, PI};

use logos::Logos;
use rustc_hash::FxHashMap;

use alsvin_ir::{Circuit, ClbitId, Instruction, PauliOp, QubitId, StandardGate};

use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

/// Parse an `OpenQASM` 2.0 program into a circuit.
///
/// Supports `qreg`/`creg` declarations, the standard gate surface plus the
/// `u1`/`u2`/`u3`/`p`/`id` qelib aliases (lowered to RZ/RY fragments),
/// register broadcasting, `measure`/`reset`/`barrier`, numeric parameter
/// expressions with `pi`, and the Pauli-based extension ops
/// `t_pauli("+XIZ")`, `s_pauli(..)`, `z_pauli(..)` and
/// `m_pauli("..") -> c[k]`. Custom `gate` definitions and `if` conditionals
/// are not supported; gate macros are expected to be resolved upstream.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => return Err(ParseError::LexerError {
                position: span.start,
            }),
        }
    }
    Parser::new(tokens).parse_program()
}

#[derive(Debug, Clone, Copy)]
struct Register {
    offset: usize,
    size: usize,
}

/// A resolved operand: a single bit or a whole register to broadcast over.
#[derive(Debug, Clone, Copy)]
enum Operand {
    Bit(usize),
    Whole(Register),
}

impl Operand {
    fn bit(self, iteration: usize) -> usize {
        match self {
            Operand::Bit(index) => index,
            Operand::Whole(reg) => reg.offset + iteration,
        }
    }

    fn broadcast_size(self) -> Option<usize> {
        match self {
            Operand::Bit(_) => None,
            Operand::Whole(reg) => Some(reg.size),
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    qregs: FxHashMap<String, Register>,
    cregs: FxHashMap<String, Register>,
    num_qubits: usize,
    num_clbits: usize,
    ops: Vec<Instruction>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            qregs: FxHashMap::default(),
            cregs: FxHashMap::default(),
            num_qubits: 0,
            num_clbits: 0,
            ops: Vec::new(),
        }
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token, context: &str) -> ParseResult<()> {
        match self.next() {
            Some(token) if token == *expected => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: context.to_string(),
                found: token.describe(),
            }),
            None => Err(ParseError::UnexpectedEof(context.to_string())),
        }
    }

    fn expect_identifier(&mut self, context: &str) -> ParseResult<String> {
        match self.next() {
            Some(Token::Identifier(name)) => Ok(name),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: context.to_string(),
                found: token.describe(),
            }),
            None => Err(ParseError::UnexpectedEof(context.to_string())),
        }
    }

    fn expect_integer(&mut self, context: &str) -> ParseResult<usize> {
        match self.next() {
            Some(Token::Integer(value)) => Ok(value as usize),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: context.to_string(),
                found: token.describe(),
            }),
            None => Err(ParseError::UnexpectedEof(context.to_string())),
        }
    }

    fn expect_string(&mut self, context: &str) -> ParseResult<String> {
        match self.next() {
            Some(Token::Str(value)) => Ok(value),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: context.to_string(),
                found: token.describe(),
            }),
            None => Err(ParseError::UnexpectedEof(context.to_string())),
        }
    }

    // =========================================================================
    // Program structure
    // =========================================================================

    fn parse_program(mut self) -> ParseResult<Circuit> {
        self.expect(&Token::OpenQasm, "OPENQASM header")?;
        match self.next() {
            Some(Token::Real(v)) if v == 2.0 => {}
            Some(token) => return Err(ParseError::InvalidVersion(token.describe())),
            None => return Err(ParseError::UnexpectedEof("version".into())),
        }
        self.expect(&Token::Semicolon, "';' after version")?;

        while let Some(token) = self.peek().cloned() {
            match token {
                Token::Include => self.parse_include()?,
                Token::QReg => self.parse_register(true)?,
                Token::CReg => self.parse_register(false)?,
                Token::Measure => self.parse_measure()?,
                Token::Reset => self.parse_reset()?,
                Token::Barrier => self.parse_barrier()?,
                Token::Gate | Token::Opaque => {
                    return Err(ParseError::Unsupported(
                        "gate definitions; resolve macros before parsing".into(),
                    ))
                }
                Token::If => {
                    return Err(ParseError::Unsupported("classical conditionals".into()))
                }
                Token::Identifier(name) => {
                    self.next();
                    self.parse_application(&name)?;
                }
                other => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "statement".into(),
                        found: other.describe(),
                    })
                }
            }
        }

        let mut circuit = Circuit::new(self.num_qubits, self.num_clbits);
        for inst in self.ops {
            circuit.push(inst)?;
        }
        Ok(circuit)
    }

    fn parse_include(&mut self) -> ParseResult<()> {
        self.next();
        self.expect_string("include path")?;
        self.expect(&Token::Semicolon, "';' after include")
    }

    fn parse_register(&mut self, quantum: bool) -> ParseResult<()> {
        self.next();
        let name = self.expect_identifier("register name")?;
        self.expect(&Token::LBracket, "'[' in register declaration")?;
        let size = self.expect_integer("register size")?;
        self.expect(&Token::RBracket, "']' in register declaration")?;
        self.expect(&Token::Semicolon, "';' after register declaration")?;

        let (regs, total) = if quantum {
            (&mut self.qregs, &mut self.num_qubits)
        } else {
            (&mut self.cregs, &mut self.num_clbits)
        };
        if regs.contains_key(&name) {
            return Err(ParseError::DuplicateDeclaration(name));
        }
        regs.insert(
            name,
            Register {
                offset: *total,
                size,
            },
        );
        *total += size;
        Ok(())
    }

    // =========================================================================
    // Operands
    // =========================================================================

    fn parse_operand(&mut self, quantum: bool) -> ParseResult<Operand> {
        let name = self.expect_identifier("register reference")?;
        let regs = if quantum { &self.qregs } else { &self.cregs };
        let reg = *regs
            .get(&name)
            .ok_or_else(|| ParseError::UndefinedRegister(name.clone()))?;
        if self.peek() == Some(&Token::LBracket) {
            self.next();
            let index = self.expect_integer("bit index")?;
            self.expect(&Token::RBracket, "']' after bit index")?;
            if index >= reg.size {
                return Err(ParseError::IndexOutOfBounds {
                    register: name,
                    index,
                    size: reg.size,
                });
            }
            Ok(Operand::Bit(reg.offset + index))
        } else {
            Ok(Operand::Whole(reg))
        }
    }

    fn parse_operand_list(&mut self, quantum: bool) -> ParseResult<Vec<Operand>> {
        let mut operands = vec![self.parse_operand(quantum)?];
        while self.peek() == Some(&Token::Comma) {
            self.next();
            operands.push(self.parse_operand(quantum)?);
        }
        Ok(operands)
    }

    /// The common broadcast size of an operand list, validating agreement.
    fn broadcast_size(operands: &[Operand]) -> ParseResult<usize> {
        let mut size = None;
        for operand in operands {
            if let Some(s) = operand.broadcast_size() {
                match size {
                    None => size = Some(s),
                    Some(prev) if prev == s => {}
                    Some(prev) => return Err(ParseError::BroadcastMismatch(prev, s)),
                }
            }
        }
        Ok(size.unwrap_or(1))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_measure(&mut self) -> ParseResult<()> {
        self.next();
        let qubit = self.parse_operand(true)?;
        self.expect(&Token::Arrow, "'->' in measure")?;
        let clbit = self.parse_operand(false)?;
        self.expect(&Token::Semicolon, "';' after measure")?;

        let operands = [qubit, clbit];
        let size = Self::broadcast_size(&operands)?;
        for i in 0..size {
            self.ops.push(Instruction::measure(
                QubitId::from(qubit.bit(i)),
                ClbitId::from(clbit.bit(i)),
            ));
        }
        Ok(())
    }

    fn parse_reset(&mut self) -> ParseResult<()> {
        self.next();
        let qubit = self.parse_operand(true)?;
        self.expect(&Token::Semicolon, "';' after reset")?;
        let size = Self::broadcast_size(&[qubit])?;
        for i in 0..size {
            self.ops
                .push(Instruction::reset(QubitId::from(qubit.bit(i))));
        }
        Ok(())
    }

    fn parse_barrier(&mut self) -> ParseResult<()> {
        self.next();
        let operands = self.parse_operand_list(true)?;
        self.expect(&Token::Semicolon, "';' after barrier")?;
        let mut qubits = Vec::new();
        for operand in operands {
            match operand {
                Operand::Bit(index) => qubits.push(QubitId::from(index)),
                Operand::Whole(reg) => {
                    qubits.extend((reg.offset..reg.offset + reg.size).map(QubitId::from));
                }
            }
        }
        self.ops.push(Instruction::barrier(qubits));
        Ok(())
    }

    fn parse_application(&mut self, name: &str) -> ParseResult<()> {
        if matches!(name, "t_pauli" | "s_pauli" | "z_pauli" | "m_pauli") {
            return self.parse_pauli_op(name);
        }

        let params = if self.peek() == Some(&Token::LParen) {
            self.next();
            let mut params = vec![self.parse_expr()?];
            while self.peek() == Some(&Token::Comma) {
                self.next();
                params.push(self.parse_expr()?);
            }
            self.expect(&Token::RParen, "')' after parameters")?;
            params
        } else {
            vec![]
        };
        let operands = self.parse_operand_list(true)?;
        self.expect(&Token::Semicolon, "';' after gate")?;

        let (expected_params, expected_qubits) = gate_arity(name)
            .ok_or_else(|| ParseError::UnknownGate(name.to_string()))?;
        if params.len() != expected_params {
            return Err(ParseError::WrongParameterCount {
                gate: name.to_string(),
                expected: expected_params,
                got: params.len(),
            });
        }
        if operands.len() != expected_qubits {
            return Err(ParseError::WrongQubitCount {
                gate: name.to_string(),
                expected: expected_qubits,
                got: operands.len(),
            });
        }

        let size = Self::broadcast_size(&operands)?;
        for i in 0..size {
            let qubits: Vec<QubitId> = operands
                .iter()
                .map(|op| QubitId::from(op.bit(i)))
                .collect();
            lower_gate(name, &params, &qubits, &mut self.ops);
        }
        Ok(())
    }

    fn parse_pauli_op(&mut self, name: &str) -> ParseResult<()> {
        self.expect(&Token::LParen, "'(' after Pauli op")?;
        let string = self.expect_string("Pauli string")?;
        self.expect(&Token::RParen, "')' after Pauli string")?;

        let op: PauliOp = string.parse().map_err(ParseError::CircuitError)?;
        let inst = match name {
            "t_pauli" => Instruction::t_pauli(op),
            "s_pauli" => Instruction::s_pauli(op),
            "z_pauli" => Instruction::z_pauli(op),
            "m_pauli" => {
                let clbit = if self.peek() == Some(&Token::Arrow) {
                    self.next();
                    match self.parse_operand(false)? {
                        Operand::Bit(index) => Some(ClbitId::from(index)),
                        Operand::Whole(_) => {
                            return Err(ParseError::Unsupported(
                                "m_pauli destination must be a single bit".into(),
                            ))
                        }
                    }
                } else {
                    None
                };
                Instruction::m_pauli(op, clbit)
            }
            _ => unreachable!(),
        };
        self.expect(&Token::Semicolon, "';' after Pauli op")?;
        self.ops.push(inst);
        Ok(())
    }

    // =========================================================================
    // Parameter expressions
    // =========================================================================

    fn parse_expr(&mut self) -> ParseResult<f64> {
        let mut value = self.parse_term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.next();
                    value += self.parse_term()?;
                }
                Some(Token::Minus) => {
                    self.next();
                    value -= self.parse_term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn parse_term(&mut self) -> ParseResult<f64> {
        let mut value = self.parse_factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.next();
                    value *= self.parse_factor()?;
                }
                Some(Token::Slash) => {
                    self.next();
                    value /= self.parse_factor()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn parse_factor(&mut self) -> ParseResult<f64> {
        let base = self.parse_unary()?;
        if self.peek() == Some(&Token::Caret) {
            self.next();
            // Right-associative exponentiation.
            let exponent = self.parse_factor()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> ParseResult<f64> {
        match self.next() {
            Some(Token::Minus) => Ok(-self.parse_unary()?),
            Some(Token::Real(value)) => Ok(value),
            Some(Token::Integer(value)) => Ok(value as f64),
            Some(Token::Pi) => Ok(PI),
            Some(Token::LParen) => {
                let value = self.parse_expr()?;
                self.expect(&Token::RParen, "')' in expression")?;
                Ok(value)
            }
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: "numeric expression".into(),
                found: token.describe(),
            }),
            None => Err(ParseError::UnexpectedEof("numeric expression".into())),
        }
    }
}

/// (parameter count, qubit count) for each supported gate name.
fn gate_arity(name: &str) -> Option<(usize, usize)> {
    Some(match name {
        "h" | "x" | "y" | "z" | "s" | "sdg" | "t" | "tdg" | "sx" | "sxdg" | "id" => (0, 1),
        "rx" | "ry" | "rz" | "p" | "u1" => (1, 1),
        "u2" => (2, 1),
        "u3" => (3, 1),
        "cx" | "cz" | "swap" => (0, 2),
        "ccx" => (0, 3),
        _ => return None,
    })
}

/// Lower a gate application to instructions. `u2`/`u3` expand to the
/// standard RZ·RY·RZ form; `id` lowers to nothing.
fn lower_gate(name: &str, params: &[f64], qubits: &[QubitId], out: &mut Vec<Instruction>) {
    let q = qubits[0];
    match name {
        "h" => out.push(Instruction::single_qubit_gate(StandardGate::H, q)),
        "x" => out.push(Instruction::single_qubit_gate(StandardGate::X, q)),
        "y" => out.push(Instruction::single_qubit_gate(StandardGate::Y, q)),
        "z" => out.push(Instruction::single_qubit_gate(StandardGate::Z, q)),
        "s" => out.push(Instruction::single_qubit_gate(StandardGate::S, q)),
        "sdg" => out.push(Instruction::single_qubit_gate(StandardGate::Sdg, q)),
        "t" => out.push(Instruction::single_qubit_gate(StandardGate::T, q)),
        "tdg" => out.push(Instruction::single_qubit_gate(StandardGate::Tdg, q)),
        "sx" => out.push(Instruction::single_qubit_gate(StandardGate::SX, q)),
        "sxdg" => out.push(Instruction::single_qubit_gate(StandardGate::SXdg, q)),
        "id" => {}
        "rx" => out.push(Instruction::single_qubit_gate(StandardGate::Rx(params[0]), q)),
        "ry" => out.push(Instruction::single_qubit_gate(StandardGate::Ry(params[0]), q)),
        "rz" | "p" | "u1" => {
            out.push(Instruction::single_qubit_gate(StandardGate::Rz(params[0]), q));
        }
        "u2" => {
            // u2(φ, λ) = RZ(φ)·RY(π/2)·RZ(λ) as a matrix product.
            out.push(Instruction::single_qubit_gate(StandardGate::Rz(params[1]), q));
            out.push(Instruction::single_qubit_gate(
                StandardGate::Ry(FRAC_PI_2),
                q,
            ));
            out.push(Instruction::single_qubit_gate(StandardGate::Rz(params[0]), q));
        }
        "u3" => {
            // u3(θ, φ, λ) = RZ(φ)·RY(θ)·RZ(λ) as a matrix product.
            out.push(Instruction::single_qubit_gate(StandardGate::Rz(params[2]), q));
            out.push(Instruction::single_qubit_gate(StandardGate::Ry(params[0]), q));
            out.push(Instruction::single_qubit_gate(StandardGate::Rz(params[1]), q));
        }
        "cx" => out.push(Instruction::two_qubit_gate(
            StandardGate::CX,
            qubits[0],
            qubits[1],
        )),
        "cz" => out.push(Instruction::two_qubit_gate(
            StandardGate::CZ,
            qubits[0],
            qubits[1],
        )),
        "swap" => out.push(Instruction::two_qubit_gate(
            StandardGate::Swap,
            qubits[0],
            qubits[1],
        )),
        "ccx" => out.push(Instruction::gate(
            StandardGate::CCX,
            [qubits[0], qubits[1], qubits[2]],
        )),
        _ => unreachable!("arity table covers all lowered gates"),
    }
}
