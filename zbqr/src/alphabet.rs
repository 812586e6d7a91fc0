use crate::error::UnknownSymbol;

/// The 64 symbols in code order. A symbol's code is its index here.
pub const ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz% ";

/// Padding symbol. Encoded like any other symbol, dropped on decode.
pub const IGNORE: char = '%';

/// Code of [`IGNORE`].
pub const IGNORE_CODE: u8 = 62;

/// Look up the 6-bit code of a symbol.
pub fn symbol_to_code(c: char) -> Result<u8, UnknownSymbol> {
    let code = match c {
        '0'..='9' => c as u8 - b'0',
        'A'..='Z' => c as u8 - b'A' + 10,
        'a'..='z' => c as u8 - b'a' + 36,
        '%' => IGNORE_CODE,
        ' ' => 63,
        _ => return Err(UnknownSymbol(c)),
    };
    Ok(code)
}

/// Look up the symbol for a code. Only the low six bits are used.
pub fn code_to_symbol(code: u8) -> char {
    ALPHABET[(code & 0x3F) as usize] as char
}

/// Code of `c`, or of the ignore marker when `c` is not in the alphabet.
pub fn symbol_or_ignore(c: char) -> u8 {
    symbol_to_code(c).unwrap_or_else(|UnknownSymbol(c)| {
        log::debug!("substituting ignore marker for unknown symbol {c:?}");
        IGNORE_CODE
    })
}

pub fn is_ignore(c: char) -> bool {
    c == IGNORE
}
