//! Java types as seen by the translator.
//!
//! The target language is dynamically typed, so types only matter for two things:
//! the value a field holds before any constructor runs, and how a type is written
//! when it is used as a class reference (superclasses, `include`, `.new` receivers).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "char" => Self::Char,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Zero value of the primitive. `char` is carried as its code point.
    #[must_use]
    pub const fn default_value(self) -> &'static str {
        match self {
            Self::Boolean => "false",
            Self::Float | Self::Double => "0.0",
            Self::Byte | Self::Char | Self::Short | Self::Int | Self::Long => "0",
        }
    }

    const fn class_reference(self) -> &'static str {
        match self {
            Self::Boolean => "Object",
            Self::Float | Self::Double => "Float",
            Self::Byte | Self::Char | Self::Short | Self::Int | Self::Long => "Integer",
        }
    }
}

/// A class or interface type: package segments plus the (possibly nested) class names.
///
/// Type arguments are erased when the type is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub package: Vec<String>,
    pub names: Vec<String>,
}

impl ClassType {
    pub fn new(package: Vec<String>, names: Vec<String>) -> Self {
        Self { package, names }
    }

    /// Splits a dotted path into package and class names: leading lowercase segments
    /// are package names, everything from the first capitalized segment on is a class.
    pub fn from_dotted(path: &str) -> Self {
        let mut package = Vec::new();
        let mut names = Vec::new();
        for segment in path.split('.') {
            let is_class = segment.chars().next().is_some_and(char::is_uppercase);
            if names.is_empty() && !is_class {
                package.push(segment.to_owned());
            } else {
                names.push(segment.to_owned());
            }
        }
        if names.is_empty() {
            // Every segment lowercase: treat the last one as the class name.
            if let Some(last) = package.pop() {
                names.push(last);
            }
        }
        Self { package, names }
    }

    pub fn object() -> Self {
        Self::java_lang("Object")
    }

    pub fn string() -> Self {
        Self::java_lang("String")
    }

    fn java_lang(name: &str) -> Self {
        Self {
            package: vec!["java".to_owned(), "lang".to_owned()],
            names: vec![name.to_owned()],
        }
    }

    #[must_use]
    pub fn is_java_lang(&self) -> bool {
        self.package == ["java", "lang"]
    }

    /// Dotted Java name, e.g. `java.util.Map.Entry`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        self.package
            .iter()
            .chain(self.names.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Constant path in the target language, e.g. `Java::Util::Map::Entry`.
    ///
    /// `java.lang` types are referenced by their bare names.
    #[must_use]
    pub fn class_reference(&self) -> String {
        let package = if self.is_java_lang() {
            Vec::new()
        } else {
            self.package.iter().map(|segment| capitalize(segment)).collect()
        };
        package
            .into_iter()
            .chain(self.names.iter().cloned())
            .collect::<Vec<_>>()
            .join("::")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Primitive(PrimitiveType),
    Class(ClassType),
    Array(Box<JavaType>),
    Void,
}

impl JavaType {
    pub fn array_of(element: JavaType) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn object() -> Self {
        Self::Class(ClassType::object())
    }

    pub fn string() -> Self {
        Self::Class(ClassType::string())
    }

    /// Literal a field of this type holds before any constructor code runs.
    #[must_use]
    pub fn default_value(&self) -> &'static str {
        match self {
            Self::Primitive(primitive) => primitive.default_value(),
            Self::Class(_) | Self::Array(_) | Self::Void => "nil",
        }
    }

    /// How the type is written where the target language expects a class.
    #[must_use]
    pub fn class_reference(&self) -> String {
        match self {
            Self::Primitive(primitive) => primitive.class_reference().to_owned(),
            Self::Class(class) => class.class_reference(),
            Self::Array(_) => "Array".to_owned(),
            Self::Void => "NilClass".to_owned(),
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => f.write_str(primitive.keyword()),
            Self::Class(class) => f.write_str(&class.qualified_name()),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Void => f.write_str("void"),
        }
    }
}

/// Uppercases the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
