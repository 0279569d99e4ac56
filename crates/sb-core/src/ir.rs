//! Structured output of the generator: a class with fields, constructors, and methods
//! whose bodies are explicit statements. Nothing here is text; renderers implementing
//! [`crate::serialize::UnitSerializer`] decide the layout.

use std::collections::BTreeSet;

use crate::descriptor::Annotation;
use crate::ty::{ClassName, Ty};
use crate::{common_enum, common_struct};

common_enum! {
    #[derive(Copy)]
    pub enum Modifier {
        Public,
        Protected,
        Private,
        Static,
        Final,
    }
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Final => "final",
        }
    }
}

common_enum! {
    pub enum DocSegment {
        Text(String),
        Link(ClassName),
    }
}

common_struct! {
    pub struct Doc {
        pub segments: Vec<DocSegment>,
    }
}

impl Doc {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.segments.push(DocSegment::Text(text.into()));
        self
    }

    pub fn link(mut self, class: ClassName) -> Self {
        self.segments.push(DocSegment::Link(class));
        self
    }
}

impl Default for Doc {
    fn default() -> Self {
        Self::new()
    }
}

common_enum! {
    pub enum Expr {
        Local(String),
        This,
        Str(String),
        ClassLiteral(Ty),
        Field {
            receiver: Box<Expr>,
            name: String,
        },
        Call {
            receiver: Box<Expr>,
            method: String,
            args: Vec<Expr>,
        },
        StaticCall {
            class: ClassName,
            method: String,
            args: Vec<Expr>,
        },
        /// `new T(args)`; with `diamond` the type arguments are left to inference (`new T<>(args)`).
        New {
            ty: Ty,
            diamond: bool,
            args: Vec<Expr>,
        },
    }
}

impl Expr {
    pub fn local(name: impl Into<String>) -> Self {
        Expr::Local(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn field(self, name: impl Into<String>) -> Self {
        Expr::Field {
            receiver: Box::new(self),
            name: name.into(),
        }
    }

    pub fn call(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            receiver: Box::new(self),
            method: method.into(),
            args,
        }
    }

    pub fn static_call(class: ClassName, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::StaticCall {
            class,
            method: method.into(),
            args,
        }
    }

    pub fn new_instance(ty: Ty, args: Vec<Expr>) -> Self {
        Expr::New {
            ty,
            diamond: false,
            args,
        }
    }

    pub fn new_diamond(ty: Ty, args: Vec<Expr>) -> Self {
        Expr::New {
            ty,
            diamond: true,
            args,
        }
    }

    fn for_each_class<'a>(&'a self, f: &mut impl FnMut(&'a ClassName)) {
        match self {
            Expr::Local(_) | Expr::This | Expr::Str(_) => {}
            Expr::ClassLiteral(ty) => ty.for_each_class(f),
            Expr::Field { receiver, .. } => receiver.for_each_class(f),
            Expr::Call { receiver, args, .. } => {
                receiver.for_each_class(f);
                args.iter().for_each(|arg| arg.for_each_class(f));
            }
            Expr::StaticCall { class, args, .. } => {
                f(class);
                args.iter().for_each(|arg| arg.for_each_class(f));
            }
            Expr::New { ty, args, .. } => {
                ty.for_each_class(f);
                args.iter().for_each(|arg| arg.for_each_class(f));
            }
        }
    }
}

common_enum! {
    pub enum Stmt {
        /// `Ty name = init;`
        Local {
            ty: Ty,
            name: String,
            init: Expr,
        },
        Assign {
            target: Expr,
            value: Expr,
        },
        Expr(Expr),
        Return(Expr),
    }
}

impl Stmt {
    pub fn local(ty: Ty, name: impl Into<String>, init: Expr) -> Self {
        Stmt::Local {
            ty,
            name: name.into(),
            init,
        }
    }

    /// Name bound by this statement, if it declares one.
    pub fn binding(&self) -> Option<&str> {
        match self {
            Stmt::Local { name, .. } => Some(name),
            _ => None,
        }
    }

    fn for_each_class<'a>(&'a self, f: &mut impl FnMut(&'a ClassName)) {
        match self {
            Stmt::Local { ty, init, .. } => {
                ty.for_each_class(f);
                init.for_each_class(f);
            }
            Stmt::Assign { target, value } => {
                target.for_each_class(f);
                value.for_each_class(f);
            }
            Stmt::Expr(expr) | Stmt::Return(expr) => expr.for_each_class(f),
        }
    }
}

common_struct! {
    pub struct ParamSpec {
        pub name: String,
        pub ty: Ty,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub annotations: Vec<Annotation>,
    }
}

common_struct! {
    pub struct FieldSpec {
        pub name: String,
        pub ty: Ty,
        pub modifiers: Vec<Modifier>,
    }
}

common_struct! {
    pub struct ConstructorSpec {
        pub modifiers: Vec<Modifier>,
        pub params: Vec<ParamSpec>,
        pub body: Vec<Stmt>,
    }
}

common_struct! {
    pub struct MethodSpec {
        pub name: String,
        pub modifiers: Vec<Modifier>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub doc: Option<Doc>,
        /// `None` renders as `void`.
        pub returns: Option<Ty>,
        pub params: Vec<ParamSpec>,
        pub body: Vec<Stmt>,
    }
}

impl MethodSpec {
    /// Erased parameter types in order: the part of a signature overloads must differ in.
    pub fn erased_signature(&self) -> Vec<Ty> {
        self.params.iter().map(|param| param.ty.erasure()).collect()
    }
}

common_struct! {
    pub struct ClassSpec {
        pub name: ClassName,
        pub modifiers: Vec<Modifier>,
        pub fields: Vec<FieldSpec>,
        pub constructors: Vec<ConstructorSpec>,
        pub methods: Vec<MethodSpec>,
    }
}

common_struct! {
    /// One generated source file.
    pub struct CompilationUnit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub header: Option<String>,
        pub class: ClassSpec,
    }
}

impl CompilationUnit {
    pub fn package(&self) -> &str {
        self.class.name.package()
    }

    /// Every class the unit mentions, in signatures, annotations, docs, and bodies.
    pub fn referenced_classes(&self) -> BTreeSet<ClassName> {
        let mut classes = BTreeSet::new();
        let mut add = |name: &ClassName| {
            classes.insert(name.clone());
        };
        let class = &self.class;
        for field in &class.fields {
            field.ty.for_each_class(&mut add);
        }
        let params = class
            .constructors
            .iter()
            .flat_map(|ctor| ctor.params.iter())
            .chain(class.methods.iter().flat_map(|method| method.params.iter()));
        for param in params {
            param.ty.for_each_class(&mut add);
            for annotation in &param.annotations {
                add(&annotation.class);
            }
        }
        let bodies = class
            .constructors
            .iter()
            .flat_map(|ctor| ctor.body.iter())
            .chain(class.methods.iter().flat_map(|method| method.body.iter()));
        for stmt in bodies {
            stmt.for_each_class(&mut add);
        }
        for method in &class.methods {
            if let Some(returns) = &method.returns {
                returns.for_each_class(&mut add);
            }
            for segment in method.doc.iter().flat_map(|doc| doc.segments.iter()) {
                if let DocSegment::Link(link) = segment {
                    add(link);
                }
            }
        }
        classes
    }
}
