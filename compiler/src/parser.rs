//! Recursive-descent parser for `.lcm` type definitions.
//!
//! [`parse_schema`] is the entry point: it reads top-level `struct` and
//! `enum` declarations and hands each finished entity back with its
//! fingerprint computed. Declaration rules from [`crate::verifier`] are
//! applied as each piece is read, so the first problem aborts the parse.

use std::fmt::Display;

use lcm_idl_schema::{
    enum_hash, is_legal_identifier, struct_hash, Dimension, Enum, EnumValue, Member, Struct,
};
use log::{debug, warn};

use crate::{
    diagnostic::{Diagnostic, DiagnosticKind},
    error::LcmError,
    tokenizer::{Token, TokenStream},
    utils::{parse_integer, quote},
    verifier,
};

/// Everything declared in one file, in declaration order.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedFile {
    pub structs: Vec<Struct>,
    pub enums:   Vec<Enum>,
}

pub fn parse_schema(path: &str, text: &str) -> Result<ParsedFile, LcmError> {
    Parser::new(TokenStream::new(path, text)).parse_file()
}

struct Parser<'a> {
    tokens: TokenStream<'a>,
}

impl<'a> Parser<'a> {
    fn new(tokens: TokenStream<'a>) -> Self {
        Parser { tokens }
    }

    fn diagnostic(&self, kind: DiagnosticKind, tok: &Token, message: impl Display) -> LcmError {
        LcmError::Diagnostic(Diagnostic::new(
            kind,
            message.to_string(),
            self.tokens.path(),
            tok.line,
            tok.column,
            self.tokens.line_text(tok.line),
        ))
    }

    fn syntax_error(&self, tok: &Token, message: impl Display) -> LcmError {
        self.diagnostic(DiagnosticKind::Syntax, tok, message)
    }

    fn semantic_error(&self, tok: &Token, message: impl Display) -> LcmError {
        self.diagnostic(DiagnosticKind::Semantic, tok, message)
    }

    /// Look at the next token; running out of input here is an error.
    fn peek(&self, description: &str) -> Result<Token, LcmError> {
        let tok = self.tokens.peek();
        if tok.is_eof() {
            return Err(self.diagnostic(
                DiagnosticKind::Eof,
                tok,
                format!("End of file while looking for {}.", description),
            ));
        }
        Ok(tok.clone())
    }

    /// If the next token is `text`, consume it and return true.
    fn try_consume(&mut self, text: &str) -> Result<bool, LcmError> {
        let matched = self.peek(text)?.text == text;
        if matched {
            self.tokens.next_token();
        }
        Ok(matched)
    }

    /// Consume the next token, which must be `text`.
    fn require(&mut self, text: &str) -> Result<(), LcmError> {
        let tok = self.require_next(&format!("token {}", quote(text)))?;
        if tok.text != text {
            return Err(self.syntax_error(
                &tok,
                format!("expected token {} but found {}", quote(text), quote(&tok.text)),
            ));
        }
        Ok(())
    }

    /// Consume the next token, whatever it is, as long as there is one.
    fn require_next(&mut self, description: &str) -> Result<Token, LcmError> {
        let tok = self.tokens.next_token();
        if tok.is_eof() {
            return Err(self.diagnostic(
                DiagnosticKind::Eof,
                &tok,
                format!("End of file reached, expected {}.", description),
            ));
        }
        Ok(tok)
    }

    fn require_identifier(&mut self, description: &str) -> Result<Token, LcmError> {
        let tok = self.require_next(description)?;
        if !is_legal_identifier(&tok.text) {
            return Err(self.syntax_error(
                &tok,
                format!("expected {} but found {}", description, quote(&tok.text)),
            ));
        }
        Ok(tok)
    }

    fn parse_file(mut self) -> Result<ParsedFile, LcmError> {
        let mut parsed = ParsedFile::default();

        loop {
            let tok = self.tokens.next_token();
            match tok.text.as_str() {
                "" => break,
                "struct" => parsed.structs.push(self.parse_struct()?),
                "enum"   => parsed.enums.push(self.parse_enum()?),
                "union"  => return Err(self.syntax_error(&tok, "unions not implemented")),
                other => {
                    warn!(
                        "{}:{}:{}: stopped at {} which does not start a declaration",
                        self.tokens.path(),
                        tok.line,
                        tok.column,
                        quote(other)
                    );
                    break;
                }
            }
        }

        debug!(
            "{}: parsed {} structs, {} enums",
            self.tokens.path(),
            parsed.structs.len(),
            parsed.enums.len()
        );
        Ok(parsed)
    }

    /// `struct NAME { member* }`, with the `struct` keyword already consumed.
    fn parse_struct(&mut self) -> Result<Struct, LcmError> {
        let name = self.require_identifier("struct name")?;
        let mut st = Struct::new(name.text, self.tokens.path());

        self.require("{")?;
        while !self.try_consume("}")? {
            self.parse_member(&mut st)?;
        }

        st.hash = struct_hash(&st.members);
        debug!("struct {} hash={:#018x}", st.name, st.hash);
        Ok(st)
    }

    /// `TYPE name dim* (, name dim*)* ;`
    fn parse_member(&mut self, st: &mut Struct) -> Result<(), LcmError> {
        let next = self.peek("type identifier")?;
        if matches!(next.text.as_str(), "struct" | "enum" | "union") {
            return Err(self.syntax_error(
                &next,
                format!("recursive {}s not implemented.", next.text),
            ));
        }

        let type_tok = self.require_next("type identifier")?;
        if !is_legal_identifier(&type_tok.text) {
            return Err(self.syntax_error(&type_tok, "invalid type name"));
        }

        loop {
            let name_tok = self.require_next("name identifier")?;
            if !is_legal_identifier(&name_tok.text) {
                return Err(self.syntax_error(
                    &name_tok,
                    "Invalid member name: must start with [a-zA-Z_].",
                ));
            }
            verifier::check_member_name(&st.members, &name_tok.text)
                .map_err(|v| self.semantic_error(&name_tok, v))?;

            let mut member = Member::new(name_tok.text.clone(), type_tok.text.clone());
            while self.try_consume("[")? {
                let dim = self.parse_dimension(&st.members)?;
                self.require("]")?;
                member.dimensions.push(dim);
            }
            // Only added once complete, so a member can't size itself.
            st.members.push(member);

            if !self.try_consume(",")? {
                break;
            }
        }

        self.require(";")
    }

    /// The size inside `[...]`, checked against the members declared before it.
    fn parse_dimension(&mut self, members: &[Member]) -> Result<Dimension, LcmError> {
        let tok = self.require_next("array size")?;

        if tok.text == "]" {
            return Err(self.semantic_error(&tok, verifier::Violation::MissingArraySize));
        }

        if tok.text.starts_with(|c: char| c.is_ascii_digit()) {
            let size = parse_integer(&tok.text).ok_or_else(|| {
                self.syntax_error(&tok, format!("Invalid array size {}", quote(&tok.text)))
            })?;
            verifier::check_constant_size(size).map_err(|v| self.semantic_error(&tok, v))?;
            return Ok(Dimension::constant(tok.text));
        }

        verifier::resolve_size_variable(members, &tok.text).map_err(|v| self.semantic_error(&tok, v))
    }

    /// `enum NAME { item (sep* item)* sep* }`, with the `enum` keyword already consumed.
    fn parse_enum(&mut self) -> Result<Enum, LcmError> {
        let name = self.require_identifier("enum name")?;
        let mut en = Enum::new(name.text, self.tokens.path());

        self.require("{")?;
        while !self.try_consume("}")? {
            self.parse_enum_value(&mut en)?;
            while self.try_consume(",")? || self.try_consume(";")? {}
        }

        en.hash = enum_hash(en.name.as_str());
        debug!("enum {} hash={:#018x}", en.name, en.hash);
        Ok(en)
    }

    /// `NAME ('=' INTEGER)?`
    fn parse_enum_value(&mut self, en: &mut Enum) -> Result<(), LcmError> {
        let name_tok = self.require_identifier("enum value name")?;

        let value = if self.try_consume("=")? {
            let lit = self.require_next("enum value literal")?;
            parse_integer(&lit.text)
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(|| {
                    self.syntax_error(
                        &lit,
                        format!("expected a 32-bit integer literal but found {}", quote(&lit.text)),
                    )
                })?
        } else {
            verifier::next_enum_value(&en.values, &name_tok.text)
                .map_err(|v| self.semantic_error(&name_tok, v))?
        };

        let entry = EnumValue { name: name_tok.text.clone(), value };
        verifier::check_enum_value(&en.values, &entry)
            .map_err(|v| self.semantic_error(&name_tok, v))?;

        en.values.push(entry);
        Ok(())
    }
}
