// Name-auction consensus core: name-state machine, block assembler and
// authoritative resolver for a naming blockchain.
// Written in 2026 by
//     Name Chain Developers
//
// To the extent possible under law, the author(s) have dedicated all copyright
// and related and neighboring rights to this software to the public domain
// worldwide. This software is distributed without any warranty.
//
// You should have received a copy of the MIT License along with this software.
// If not, see <https://opensource.org/licenses/MIT>.

//! The per-resource string-interning table (spec.md §4.1: "repeated
//! length-prefixed strings with back-references, so repeated labels are
//! encoded once per resource").
//!
//! Rather than re-encoding a DNS-style offset pointer into a shared byte
//! stream, a [`SymbolTable`] interns each distinct string once per resource
//! and every record refers to it by table index. The back-reference is the
//! index itself, resolved once at decode time instead of chased byte by
//! byte.

use crate::error::OperationalError;

/// An interning table of strings shared by every record in one [`super::Resource`].
///
/// Encoded as a `u16` count followed by each string as a 1-byte length
/// prefix (strings longer than 255 bytes are rejected by [`SymbolTable::intern`]
/// before they ever reach the wire) plus its UTF-8 bytes.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct SymbolTable {
    strings: Vec<String>,
}

/// An index into a [`SymbolTable`], resolved at decode time.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol(pub u16);

impl SymbolTable {
    /// Intern `s`, returning its back-reference. A string already present
    /// reuses its existing index rather than being written twice.
    pub fn intern(&mut self, s: &str) -> Result<Symbol, OperationalError> {
        if s.len() > 255 {
            return Err(OperationalError::Decode(format!(
                "symbol {:?} exceeds the 255-byte table entry limit",
                s
            )));
        }
        if let Some(idx) = self.strings.iter().position(|existing| existing == s) {
            return Ok(Symbol(idx as u16));
        }
        self.strings.push(s.to_owned());
        Ok(Symbol((self.strings.len() - 1) as u16))
    }

    /// Resolve a back-reference produced by [`SymbolTable::intern`].
    pub fn resolve(&self, symbol: Symbol) -> Result<&str, OperationalError> {
        self.strings
            .get(symbol.0 as usize)
            .map(String::as_str)
            .ok_or_else(|| OperationalError::Decode(format!("symbol index {} out of range", symbol.0)))
    }

    /// Serialize the table: `u16` count, then each entry length-prefixed.
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(self.strings.len() as u16).to_be_bytes());
        for s in &self.strings {
            out.push(s.len() as u8);
            out.extend_from_slice(s.as_bytes());
        }
    }

    /// Parse a table previously written by [`SymbolTable::write`], returning
    /// the table and the number of bytes consumed from `buf`.
    pub fn read(buf: &[u8]) -> Result<(Self, usize), OperationalError> {
        let short = || OperationalError::Decode("truncated symbol table".into());
        if buf.len() < 2 {
            return Err(short());
        }
        let count = u16::from_be_bytes([buf[0], buf[1]]) as usize;
        let mut pos = 2;
        let mut strings = Vec::with_capacity(count);
        for _ in 0..count {
            if pos >= buf.len() {
                return Err(short());
            }
            let len = buf[pos] as usize;
            pos += 1;
            if pos + len > buf.len() {
                return Err(short());
            }
            let s = std::str::from_utf8(&buf[pos..pos + len])
                .map_err(|e| OperationalError::Decode(e.to_string()))?
                .to_owned();
            pos += len;
            strings.push(s);
        }
        Ok((SymbolTable { strings }, pos))
    }
}
