//! Semantic types referenced by descriptors and by the generated code.
//!
//! Types are written in source style (`java.util.List<java.lang.String>`, `int[]`, `T`)
//! and parsed by [`Ty::parse`]. The same representation is reused by the IR, so a
//! parameter's type flows unchanged from the manifest into the rendered signature.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{common_enum, common_struct};

/// Fully qualified class name, split into package and the chain of (possibly nested)
/// simple names: `springboard.runtime.Url.Builder` is package `springboard.runtime`,
/// simple names `[Url, Builder]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![simple_name.into()],
        }
    }

    /// Guess package and simple names from a dotted name: the first segment starting
    /// with an upper-case letter opens the simple-name chain.
    pub fn best_guess(name: &str) -> Result<Self> {
        let segments: Vec<&str> = name.split('.').collect();
        if let Some(bad) = segments.iter().find(|segment| !is_identifier(segment)) {
            return Err(Error::type_parse(
                name,
                format!("`{bad}` is not a valid identifier segment"),
            ));
        }
        let Some(first_class) = segments
            .iter()
            .position(|segment| segment.starts_with(|c: char| c.is_uppercase()))
        else {
            return Err(Error::type_parse(
                name,
                "no segment starts with an upper-case letter",
            ));
        };
        Ok(Self {
            package: segments[..first_class].join("."),
            simple_names: segments[first_class..]
                .iter()
                .map(|segment| segment.to_string())
                .collect(),
        })
    }

    pub fn nested(&self, name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    pub fn simple_name(&self) -> &str {
        self.simple_names
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The outermost enclosing class; the unit an import statement names.
    pub fn top_level(&self) -> Self {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names.iter().take(1).cloned().collect(),
        }
    }

    /// `Outer.Inner` without the package.
    pub fn relative_name(&self) -> String {
        self.simple_names.join(".")
    }

    pub fn canonical_name(&self) -> String {
        if self.package.is_empty() {
            self.relative_name()
        } else {
            format!("{}.{}", self.package, self.relative_name())
        }
    }

    pub fn object() -> Self {
        Self::new("java.lang", "Object")
    }
}

impl Display for ClassName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

impl FromStr for ClassName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::best_guess(s.trim())
    }
}

impl TryFrom<String> for ClassName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ClassName> for String {
    fn from(name: ClassName) -> Self {
        name.canonical_name()
    }
}

common_enum! {
    #[derive(Copy, PartialOrd, Ord)]
    pub enum PrimitiveType {
        Boolean,
        Byte,
        Short,
        Char,
        Int,
        Long,
        Float,
        Double,
    }
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Char,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }
}

common_struct! {
    pub struct TypeParameterized {
        pub raw: ClassName,
        pub args: Vec<Ty>,
    }
}

common_struct! {
    pub struct TypeWildcard {
        pub upper: Option<Box<Ty>>,
        pub lower: Option<Box<Ty>>,
    }
}

common_enum! {
    /// A (possibly nested-generic) type.
    #[serde(try_from = "String", into = "String")]
    pub enum Ty {
        Class(ClassName),
        Primitive(PrimitiveType),
        Array(Box<Ty>),
        Parameterized(TypeParameterized),
        Variable(String),
        Wildcard(TypeWildcard),
    }
}

impl Ty {
    pub fn array(component: Ty) -> Self {
        Ty::Array(Box::new(component))
    }

    pub fn parameterized(raw: ClassName, args: Vec<Ty>) -> Self {
        Ty::Parameterized(TypeParameterized { raw, args })
    }

    pub fn parse(input: &str) -> Result<Self> {
        TypeParser::new(input).parse()
    }

    /// The class whose literal names this type at runtime, if there is one.
    pub fn raw_class(&self) -> Option<&ClassName> {
        match self {
            Ty::Class(name) => Some(name),
            Ty::Parameterized(p) => Some(&p.raw),
            _ => None,
        }
    }

    /// True when the type carries type arguments, variables, or wildcards somewhere,
    /// i.e. when a plain class literal cannot describe it.
    pub fn is_generic(&self) -> bool {
        match self {
            Ty::Class(_) | Ty::Primitive(_) => false,
            Ty::Array(component) => component.is_generic(),
            Ty::Parameterized(_) | Ty::Variable(_) | Ty::Wildcard(_) => true,
        }
    }

    /// First type variable or wildcard found anywhere in this type. A type containing
    /// neither can be named in a `new` expression.
    pub fn first_unresolved(&self) -> Option<&Ty> {
        match self {
            Ty::Class(_) | Ty::Primitive(_) => None,
            Ty::Array(component) => component.first_unresolved(),
            Ty::Parameterized(p) => p.args.iter().find_map(Ty::first_unresolved),
            Ty::Variable(_) | Ty::Wildcard(_) => Some(self),
        }
    }

    /// First primitive used as a type argument or wildcard bound, where Java only
    /// admits reference types (`List<int>`; `List<int[]>` is fine).
    pub fn primitive_argument(&self) -> Option<&Ty> {
        match self {
            Ty::Class(_) | Ty::Primitive(_) | Ty::Variable(_) => None,
            Ty::Array(component) => component.primitive_argument(),
            Ty::Parameterized(p) => p.args.iter().find_map(Ty::primitive_in_argument),
            Ty::Wildcard(w) => w
                .upper
                .as_deref()
                .or(w.lower.as_deref())
                .and_then(Ty::primitive_in_argument),
        }
    }

    fn primitive_in_argument(&self) -> Option<&Ty> {
        match self {
            Ty::Primitive(_) => Some(self),
            other => other.primitive_argument(),
        }
    }

    /// Java erasure, used to compare overload signatures.
    pub fn erasure(&self) -> Ty {
        match self {
            Ty::Class(_) | Ty::Primitive(_) => self.clone(),
            Ty::Array(component) => Ty::array(component.erasure()),
            Ty::Parameterized(p) => Ty::Class(p.raw.clone()),
            Ty::Variable(_) => Ty::Class(ClassName::object()),
            Ty::Wildcard(w) => match &w.upper {
                Some(upper) => upper.erasure(),
                None => Ty::Class(ClassName::object()),
            },
        }
    }

    /// Visit every class name mentioned anywhere in this type.
    pub fn for_each_class<'a>(&'a self, f: &mut impl FnMut(&'a ClassName)) {
        match self {
            Ty::Class(name) => f(name),
            Ty::Primitive(_) | Ty::Variable(_) => {}
            Ty::Array(component) => component.for_each_class(f),
            Ty::Parameterized(p) => {
                f(&p.raw);
                for arg in &p.args {
                    arg.for_each_class(f);
                }
            }
            Ty::Wildcard(w) => {
                if let Some(upper) = &w.upper {
                    upper.for_each_class(f);
                }
                if let Some(lower) = &w.lower {
                    lower.for_each_class(f);
                }
            }
        }
    }
}

impl From<ClassName> for Ty {
    fn from(name: ClassName) -> Self {
        Ty::Class(name)
    }
}

impl Display for Ty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Class(name) => write!(f, "{name}"),
            Ty::Primitive(p) => f.write_str(p.keyword()),
            Ty::Array(component) => write!(f, "{component}[]"),
            Ty::Parameterized(p) => {
                write!(f, "{}<{}>", p.raw, p.args.iter().join(", "))
            }
            Ty::Variable(name) => f.write_str(name),
            Ty::Wildcard(w) => match (&w.upper, &w.lower) {
                (Some(upper), _) => write!(f, "? extends {upper}"),
                (None, Some(lower)) => write!(f, "? super {lower}"),
                (None, None) => f.write_str("?"),
            },
        }
    }
}

impl FromStr for Ty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ty::parse(s)
    }
}

impl TryFrom<String> for Ty {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Ty::parse(&value)
    }
}

impl From<Ty> for String {
    fn from(ty: Ty) -> Self {
        ty.to_string()
    }
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null", "_",
];

pub fn is_keyword(s: &str) -> bool {
    JAVA_KEYWORDS.contains(&s)
}

/// Recursive-descent parser over the source-style type syntax.
///
/// A single-segment name made only of upper-case letters and digits (`T`, `K`, `T1`)
/// is a type variable; any other name is a class name.
struct TypeParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(mut self) -> Result<Ty> {
        let ty = self.parse_type()?;
        self.skip_ws();
        if self.pos < self.input.len() {
            return Err(self.error(format!("unexpected trailing input `{}`", self.rest())));
        }
        Ok(ty)
    }

    fn parse_type(&mut self) -> Result<Ty> {
        let mut ty = self.parse_base()?;
        while self.eat('[') {
            self.expect(']')?;
            ty = Ty::array(ty);
        }
        Ok(ty)
    }

    fn parse_base(&mut self) -> Result<Ty> {
        self.skip_ws();
        if self.eat('?') {
            return self.parse_wildcard();
        }
        let name = self.parse_name()?;
        if let Some(primitive) = PrimitiveType::from_keyword(&name) {
            return Ok(Ty::Primitive(primitive));
        }
        if is_type_variable(&name) {
            return Ok(Ty::Variable(name));
        }
        let class = ClassName::best_guess(&name).map_err(|err| match err {
            Error::TypeParse { message, .. } => self.error(message),
            other => other,
        })?;
        if !self.eat('<') {
            return Ok(Ty::Class(class));
        }
        let mut args = vec![self.parse_type()?];
        while self.eat(',') {
            args.push(self.parse_type()?);
        }
        self.expect('>')?;
        Ok(Ty::parameterized(class, args))
    }

    fn parse_wildcard(&mut self) -> Result<Ty> {
        self.skip_ws();
        let save = self.pos;
        let bound = if self.peek().is_some_and(|c| c.is_alphabetic()) {
            self.parse_name()?
        } else {
            String::new()
        };
        match bound.as_str() {
            "extends" => Ok(Ty::Wildcard(TypeWildcard {
                upper: Some(Box::new(self.parse_type()?)),
                lower: None,
            })),
            "super" => Ok(Ty::Wildcard(TypeWildcard {
                upper: None,
                lower: Some(Box::new(self.parse_type()?)),
            })),
            _ => {
                self.pos = save;
                Ok(Ty::Wildcard(TypeWildcard {
                    upper: None,
                    lower: None,
                }))
            }
        }
    }

    fn parse_name(&mut self) -> Result<String> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' || c == '.' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error(match self.peek() {
                Some(c) => format!("expected a type name, found `{c}`"),
                None => "expected a type name, found end of input".to_string(),
            }));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{expected}` at offset {}", self.pos)))
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::type_parse(self.input, message)
    }
}

fn is_type_variable(name: &str) -> bool {
    !name.contains('.')
        && name.starts_with(|c: char| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}
