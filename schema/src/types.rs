use serde::Serialize;

/// A possibly package-qualified type name such as `bot_core.pose_t`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeName {
    name: String,
}

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        TypeName { name: name.into() }
    }

    /// The full name as written in the source.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Everything before the last `.`, or `""` when unqualified.
    pub fn package(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[..idx],
            None      => "",
        }
    }

    /// Everything after the last `.`, or the whole name when unqualified.
    pub fn shortname(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[idx + 1..],
            None      => &self.name,
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// How the length of one array axis is determined.
///
/// The discriminant is fed into the struct fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DimensionMode {
    Constant = 0,
    Variable = 1,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub mode: DimensionMode,
    /// The literal integer text for `Constant`, the sibling member name for `Variable`.
    pub size: String,
}

impl Dimension {
    pub fn constant(size: impl Into<String>) -> Self {
        Dimension { mode: DimensionMode::Constant, size: size.into() }
    }

    pub fn variable(member: impl Into<String>) -> Self {
        Dimension { mode: DimensionMode::Variable, size: member.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    #[serde(rename = "type")]
    pub type_:      TypeName,
    pub name:       String,
    /// Outermost axis first. Empty for scalars.
    pub dimensions: Vec<Dimension>,
}

impl Member {
    pub fn new(name: impl Into<String>, type_: impl Into<String>) -> Self {
        Member {
            type_:      TypeName::new(type_),
            name:       name.into(),
            dimensions: Vec::new(),
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// True for scalars and for arrays whose every axis has a constant size.
    pub fn is_constant_size_array(&self) -> bool {
        self.dimensions
            .iter()
            .all(|dim| dim.mode == DimensionMode::Constant)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub name:  String,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enum {
    pub name:        TypeName,
    /// Path of the file that declared this enum.
    pub source_file: String,
    pub values:      Vec<EnumValue>,
    pub hash:        i64,
}

impl Enum {
    pub fn new(name: impl Into<String>, source_file: impl Into<String>) -> Self {
        Enum {
            name:        TypeName::new(name),
            source_file: source_file.into(),
            values:      Vec::new(),
            hash:        0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Struct {
    pub name:        TypeName,
    /// Path of the file that declared this struct.
    pub source_file: String,
    /// Declaration order matters: it drives the fingerprint.
    pub members:     Vec<Member>,
    pub hash:        i64,
}

impl Struct {
    pub fn new(name: impl Into<String>, source_file: impl Into<String>) -> Self {
        Struct {
            name:        TypeName::new(name),
            source_file: source_file.into(),
            members:     Vec::new(),
            hash:        0,
        }
    }

    pub fn find_member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}
