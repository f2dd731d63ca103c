//! Leaf script templates for the swap contract, plus the P2TR output script.
//!
//! Hashlock: `OP_SHA256 <secret_hash> OP_EQUALVERIFY OP_DUP OP_HASH160 <enabler_pkh> OP_EQUALVERIFY OP_CHECKSIG`
//! Timelock: `<n> OP_CHECKSEQUENCEVERIFY OP_DROP OP_DUP OP_HASH160 <user_pkh> OP_EQUALVERIFY OP_CHECKSIG`

use alloc::vec::Vec;

use byteorder::{ByteOrder, LittleEndian};

use crate::types::{PubkeyHash, XOnlyKey};

pub mod opcodes {
    pub const OP_0: u8 = 0x00;
    pub const OP_PUSHDATA1: u8 = 0x4c;
    pub const OP_PUSHDATA2: u8 = 0x4d;
    pub const OP_PUSHDATA4: u8 = 0x4e;
    pub const OP_1NEGATE: u8 = 0x4f;
    pub const OP_1: u8 = 0x51;
    pub const OP_DROP: u8 = 0x75;
    pub const OP_DUP: u8 = 0x76;
    pub const OP_EQUALVERIFY: u8 = 0x88;
    pub const OP_SHA256: u8 = 0xa8;
    pub const OP_HASH160: u8 = 0xa9;
    pub const OP_CHECKSIG: u8 = 0xac;
    pub const OP_CHECKSEQUENCEVERIFY: u8 = 0xb2;
}

use opcodes::*;

/// P2TR script prefix: OP_1 (0x51) push 32 bytes (0x20).
pub const P2TR_SCRIPT_PREFIX: [u8; 2] = [OP_1, 0x20];

/// Minimal byte-level script assembler.
#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder {
    code: Vec<u8>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self { code: Vec::new() }
    }

    pub fn push_opcode(mut self, opcode: u8) -> Self {
        self.code.push(opcode);
        self
    }

    /// Pushes `data` with the smallest push opcode that fits its length.
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.code.push(len as u8);
        } else if len <= 0xff {
            self.code.push(OP_PUSHDATA1);
            self.code.push(len as u8);
        } else if len <= 0xffff {
            let mut b = [0u8; 2];
            LittleEndian::write_u16(&mut b, len as u16);
            self.code.push(OP_PUSHDATA2);
            self.code.extend_from_slice(&b);
        } else {
            let mut b = [0u8; 4];
            LittleEndian::write_u32(&mut b, len as u32);
            self.code.push(OP_PUSHDATA4);
            self.code.extend_from_slice(&b);
        }
        self.code.extend_from_slice(data);
        self
    }

    /// Pushes a script number: small values as OP_0 / OP_1NEGATE / OP_1..OP_16,
    /// anything else as minimally encoded sign-magnitude bytes.
    pub fn push_int(self, n: i64) -> Self {
        match n {
            0 => self.push_opcode(OP_0),
            -1 => self.push_opcode(OP_1NEGATE),
            1..=16 => self.push_opcode(OP_1 + (n as u8 - 1)),
            _ => {
                let bytes = script_num(n);
                self.push_slice(&bytes)
            }
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.code
    }
}

/// Minimal little-endian sign-magnitude encoding of a script number.
pub fn script_num(n: i64) -> Vec<u8> {
    let mut out = Vec::new();
    if n == 0 {
        return out;
    }
    let negative = n < 0;
    let mut abs = n.unsigned_abs();
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    // Top bit is the sign; add a byte if the magnitude already uses it.
    let last = out.len() - 1;
    if out[last] & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        out[last] |= 0x80;
    }
    out
}

/// Spendable by the enabler once the preimage of `secret_hash` is revealed.
pub fn hashlock_script(secret_hash: &[u8; 32], enabler: &PubkeyHash) -> Vec<u8> {
    ScriptBuilder::new()
        .push_opcode(OP_SHA256)
        .push_slice(secret_hash)
        .push_opcode(OP_EQUALVERIFY)
        .push_opcode(OP_DUP)
        .push_opcode(OP_HASH160)
        .push_slice(enabler)
        .push_opcode(OP_EQUALVERIFY)
        .push_opcode(OP_CHECKSIG)
        .into_bytes()
}

/// Spendable by the user after `relative_locktime` (BIP-68 nSequence value).
pub fn timelock_script(relative_locktime: u32, user: &PubkeyHash) -> Vec<u8> {
    ScriptBuilder::new()
        .push_int(relative_locktime as i64)
        .push_opcode(OP_CHECKSEQUENCEVERIFY)
        .push_opcode(OP_DROP)
        .push_opcode(OP_DUP)
        .push_opcode(OP_HASH160)
        .push_slice(user)
        .push_opcode(OP_EQUALVERIFY)
        .push_opcode(OP_CHECKSIG)
        .into_bytes()
}

/// Segwit v1 output script paying to `output_key`.
pub fn p2tr_script_pubkey(output_key: &XOnlyKey) -> [u8; 34] {
    let mut script = [0u8; 34];
    script[..2].copy_from_slice(&P2TR_SCRIPT_PREFIX);
    script[2..].copy_from_slice(output_key);
    script
}
