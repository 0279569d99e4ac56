//! Java printer for [`CompilationUnit`]s.

use itertools::Itertools;
use sb_core::descriptor::Annotation;
use sb_core::ir::{
    ClassSpec, CompilationUnit, ConstructorSpec, Doc, DocSegment, Expr, FieldSpec, MethodSpec,
    Modifier, ParamSpec, Stmt,
};
use sb_core::pretty::{escape_string, SourceWriter};
use sb_core::{GeneratorConfig, Result, Ty, UnitSerializer};

use crate::imports::ImportTable;

#[derive(Debug, Clone)]
pub struct JavaRenderer {
    indent: usize,
}

impl JavaRenderer {
    pub fn new() -> Self {
        Self { indent: 4 }
    }

    pub fn with_indent(indent: usize) -> Self {
        Self { indent }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::with_indent(config.indent)
    }
}

impl Default for JavaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitSerializer for JavaRenderer {
    fn serialize_unit(&self, unit: &CompilationUnit) -> Result<String> {
        let referenced = unit.referenced_classes();
        let imports = ImportTable::build(unit.package(), &unit.class.name, referenced.iter());
        let mut emitter = JavaEmitter {
            out: SourceWriter::new(self.indent),
            imports,
        };
        emitter.emit_unit(unit);
        Ok(emitter.out.finish())
    }

    fn file_name(&self, unit: &CompilationUnit) -> String {
        format!("{}.java", unit.class.name.simple_name())
    }
}

struct JavaEmitter {
    out: SourceWriter,
    imports: ImportTable,
}

impl JavaEmitter {
    fn emit_unit(&mut self, unit: &CompilationUnit) {
        if let Some(header) = &unit.header {
            for line in header.lines() {
                self.out.line(format!("// {line}"));
            }
            self.out.blank();
        }
        if !unit.package().is_empty() {
            self.out.line(format!("package {};", unit.package()));
            self.out.blank();
        }
        let imports: Vec<String> = self
            .imports
            .imports()
            .map(|class| format!("import {};", class.canonical_name()))
            .collect();
        if !imports.is_empty() {
            for import in imports {
                self.out.line(import);
            }
            self.out.blank();
        }
        self.emit_class(&unit.class);
    }

    fn emit_class(&mut self, class: &ClassSpec) {
        self.out.line(format!(
            "{}class {} {{",
            modifiers(&class.modifiers),
            class.name.simple_name()
        ));
        self.out.increase_indent();
        for field in &class.fields {
            self.emit_field(field);
        }
        for ctor in &class.constructors {
            self.out.blank();
            self.emit_constructor(class.name.simple_name(), ctor);
        }
        for method in &class.methods {
            self.out.blank();
            self.emit_method(method);
        }
        self.out.decrease_indent();
        self.out.line("}");
    }

    fn emit_field(&mut self, field: &FieldSpec) {
        let line = format!(
            "{}{} {};",
            modifiers(&field.modifiers),
            self.ty(&field.ty),
            field.name
        );
        self.out.line(line);
    }

    fn emit_constructor(&mut self, class_name: &str, ctor: &ConstructorSpec) {
        let line = format!(
            "{}{}({}) {{",
            modifiers(&ctor.modifiers),
            class_name,
            self.params(&ctor.params)
        );
        self.out.line(line);
        self.emit_body(&ctor.body);
        self.out.line("}");
    }

    fn emit_method(&mut self, method: &MethodSpec) {
        if let Some(doc) = &method.doc {
            self.emit_doc(doc);
        }
        let returns = match &method.returns {
            Some(ty) => self.ty(ty),
            None => "void".to_string(),
        };
        let line = format!(
            "{}{} {}({}) {{",
            modifiers(&method.modifiers),
            returns,
            method.name,
            self.params(&method.params)
        );
        self.out.line(line);
        self.emit_body(&method.body);
        self.out.line("}");
    }

    fn emit_doc(&mut self, doc: &Doc) {
        let text: String = doc
            .segments
            .iter()
            .map(|segment| match segment {
                DocSegment::Text(text) => text.clone(),
                DocSegment::Link(class) => format!("{{@link {}}}", self.imports.reference(class)),
            })
            .collect();
        self.out.line("/**");
        for line in text.lines() {
            self.out.line(format!(" * {line}").trim_end());
        }
        self.out.line(" */");
    }

    fn emit_body(&mut self, body: &[Stmt]) {
        let lines: Vec<String> = body.iter().map(|stmt| self.stmt(stmt)).collect();
        self.out.with_indent(|out| {
            for line in lines {
                out.line(line);
            }
        });
    }

    fn params(&self, params: &[ParamSpec]) -> String {
        params
            .iter()
            .map(|param| {
                let annotations: String = param
                    .annotations
                    .iter()
                    .map(|annotation| format!("{} ", self.annotation(annotation)))
                    .collect();
                format!("{}{} {}", annotations, self.ty(&param.ty), param.name)
            })
            .join(", ")
    }

    fn annotation(&self, annotation: &Annotation) -> String {
        let name = self.imports.reference(&annotation.class);
        match &annotation.arguments {
            Some(arguments) => format!("@{name}({arguments})"),
            None => format!("@{name}"),
        }
    }

    fn stmt(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Local { ty, name, init } => {
                format!("{} {} = {};", self.ty(ty), name, self.expr(init))
            }
            Stmt::Assign { target, value } => {
                format!("{} = {};", self.expr(target), self.expr(value))
            }
            Stmt::Expr(expr) => format!("{};", self.expr(expr)),
            Stmt::Return(expr) => format!("return {};", self.expr(expr)),
        }
    }

    fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Local(name) => name.clone(),
            Expr::This => "this".to_string(),
            Expr::Str(value) => format!("\"{}\"", escape_string(value)),
            Expr::ClassLiteral(ty) => format!("{}.class", self.ty(&ty.erasure())),
            Expr::Field { receiver, name } => format!("{}.{}", self.expr(receiver), name),
            Expr::Call {
                receiver,
                method,
                args,
            } => format!("{}.{}({})", self.expr(receiver), method, self.args(args)),
            Expr::StaticCall {
                class,
                method,
                args,
            } => format!(
                "{}.{}({})",
                self.imports.reference(class),
                method,
                self.args(args)
            ),
            Expr::New { ty, diamond, args } => {
                let ty = match (diamond, ty.raw_class()) {
                    (true, Some(raw)) => format!("{}<>", self.imports.reference(raw)),
                    _ => self.ty(ty),
                };
                format!("new {}({})", ty, self.args(args))
            }
        }
    }

    fn args(&self, args: &[Expr]) -> String {
        args.iter().map(|arg| self.expr(arg)).join(", ")
    }

    fn ty(&self, ty: &Ty) -> String {
        match ty {
            Ty::Class(class) => self.imports.reference(class),
            Ty::Primitive(primitive) => primitive.keyword().to_string(),
            Ty::Array(component) => format!("{}[]", self.ty(component)),
            Ty::Parameterized(p) => format!(
                "{}<{}>",
                self.imports.reference(&p.raw),
                p.args.iter().map(|arg| self.ty(arg)).join(", ")
            ),
            Ty::Variable(name) => name.clone(),
            Ty::Wildcard(w) => match (&w.upper, &w.lower) {
                (Some(upper), _) => format!("? extends {}", self.ty(upper)),
                (None, Some(lower)) => format!("? super {}", self.ty(lower)),
                (None, None) => "?".to_string(),
            },
        }
    }
}

fn modifiers(modifiers: &[Modifier]) -> String {
    modifiers
        .iter()
        .map(|modifier| format!("{} ", modifier.keyword()))
        .collect()
}
