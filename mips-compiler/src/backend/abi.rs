use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    Zero, At, V0, V1, A0, A1, A2, A3,
    T0, T1, T2, T3, T4, T5, T6, T7,
    S0, S1, S2, S3, S4, S5, S6, S7,
    T8, T9, K0, K1, Gp, Sp, Fp, Ra,
}

impl Register {
    /// The whole register file, indexed by hardware number.
    pub const ALL: [Register; 32] = [
        Register::Zero, Register::At, Register::V0, Register::V1,
        Register::A0, Register::A1, Register::A2, Register::A3,
        Register::T0, Register::T1, Register::T2, Register::T3,
        Register::T4, Register::T5, Register::T6, Register::T7,
        Register::S0, Register::S1, Register::S2, Register::S3,
        Register::S4, Register::S5, Register::S6, Register::S7,
        Register::T8, Register::T9, Register::K0, Register::K1,
        Register::Gp, Register::Sp, Register::Fp, Register::Ra,
    ];

    /// Allocatable pool in allocation priority order.
    pub const ALLOCATABLE: [Register; 18] = [
        Register::T0, Register::T1, Register::T2, Register::T3,
        Register::T4, Register::T5, Register::T6, Register::T7,
        Register::S0, Register::S1, Register::S2, Register::S3,
        Register::S4, Register::S5, Register::S6, Register::S7,
        Register::T8, Register::T9,
    ];

    pub const ZERO_REG: Register = Register::Zero;
    pub const ASM_TEMP: Register = Register::At;
    pub const RETURN_REG: Register = Register::V0;
    pub const STACK_PTR: Register = Register::Sp;
    pub const FRAME_PTR: Register = Register::Fp;
    pub const LINK_REG: Register = Register::Ra;

    /// Hardware register number (0..32).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Register::ALL.into_iter().find(|r| r.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Register::Zero => "$zero",
            Register::At => "$at",
            Register::V0 => "$v0",
            Register::V1 => "$v1",
            Register::A0 => "$a0",
            Register::A1 => "$a1",
            Register::A2 => "$a2",
            Register::A3 => "$a3",
            Register::T0 => "$t0",
            Register::T1 => "$t1",
            Register::T2 => "$t2",
            Register::T3 => "$t3",
            Register::T4 => "$t4",
            Register::T5 => "$t5",
            Register::T6 => "$t6",
            Register::T7 => "$t7",
            Register::S0 => "$s0",
            Register::S1 => "$s1",
            Register::S2 => "$s2",
            Register::S3 => "$s3",
            Register::S4 => "$s4",
            Register::S5 => "$s5",
            Register::S6 => "$s6",
            Register::S7 => "$s7",
            Register::T8 => "$t8",
            Register::T9 => "$t9",
            Register::K0 => "$k0",
            Register::K1 => "$k1",
            Register::Gp => "$gp",
            Register::Sp => "$sp",
            Register::Fp => "$fp",
            Register::Ra => "$ra",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
