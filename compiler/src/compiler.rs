use std::fmt::Write;
use std::fs;
use std::path::Path;

use lcm_idl_schema::{DimensionMode, Enum, Struct};
use log::{debug, info};
use serde::Serialize;

use crate::{diagnostic::Diagnostic, error::LcmError, parser::parse_schema};

/// Every struct and enum parsed in one run, in the order they were declared.
///
/// A file either contributes all of its declarations or, if it fails to
/// parse, none of them.
#[derive(Debug, Default, Serialize)]
pub struct SchemaRegistry {
    structs:  Vec<Struct>,
    enums:    Vec<Enum>,
    #[serde(skip)]
    warnings: Vec<Diagnostic>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structs(&self) -> &[Struct] {
        &self.structs
    }

    pub fn enums(&self) -> &[Enum] {
        &self.enums
    }

    /// Non-fatal diagnostics gathered so far.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn push_warning(&mut self, warning: Diagnostic) {
        debug!("warning: {}", warning);
        self.warnings.push(warning);
    }

    pub fn find_struct(&self, name: &str) -> Option<&Struct> {
        self.structs.iter().find(|s| s.name.as_str() == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name.as_str() == name)
    }

    /// Read and parse one `.lcm` file.
    pub fn handle_file(&mut self, path: impl AsRef<Path>) -> Result<(), LcmError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LcmError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.handle_source(&path.display().to_string(), &text)
    }

    /// Parse `text` as if it were read from `path`.
    pub fn handle_source(&mut self, path: &str, text: &str) -> Result<(), LcmError> {
        let parsed = parse_schema(path, text)?;
        info!(
            "{}: {} structs, {} enums",
            path,
            parsed.structs.len(),
            parsed.enums.len()
        );
        self.structs.extend(parsed.structs);
        self.enums.extend(parsed.enums);
        Ok(())
    }

    /// Pretty-printed JSON of every struct and enum, for out-of-process emitters.
    pub fn to_json(&self) -> Result<String, LcmError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable listing of the registry, enums first.
    pub fn dump(&self) -> String {
        let mut out = String::new();

        for en in &self.enums {
            let _ = writeln!(out, "enum {}", en.name);
            for value in &en.values {
                let _ = writeln!(out, "        {:<20}  {}", value.name, value.value);
            }
        }

        for st in &self.structs {
            let _ = writeln!(out, "struct {} [hash=0x{:016x}]", st.name, st.hash);
            for member in &st.members {
                let _ = write!(out, "\t{:<20}  {}", member.type_.as_str(), member.name);
                for dim in &member.dimensions {
                    let mode = match dim.mode {
                        DimensionMode::Constant => "const",
                        DimensionMode::Variable => "var",
                    };
                    let _ = write!(out, " [ ({}) {} ]", mode, dim.size);
                }
                out.push('\n');
            }
        }
        out
    }
}

/// Parse a single source text into a fresh registry.
pub fn compile_schema(path: &str, text: &str) -> Result<SchemaRegistry, LcmError> {
    let mut registry = SchemaRegistry::new();
    registry.handle_source(path, text)?;
    Ok(registry)
}
