use sb_core::ir::{
    ClassSpec, CompilationUnit, ConstructorSpec, Expr, FieldSpec, MethodSpec, Modifier, ParamSpec,
    Stmt,
};
use sb_core::{GeneratorConfig, Ty};

/// Wraps the synthesized methods into the generated class: one immutable context field,
/// one constructor storing it, then every method in the order given.
pub struct EntryPointEmitter<'c> {
    config: &'c GeneratorConfig,
}

impl<'c> EntryPointEmitter<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn emit(&self, methods: Vec<MethodSpec>) -> CompilationUnit {
        let context_ty = Ty::Class(self.config.runtime.context_class.clone());
        let field = self.config.context_field.clone();

        let context_field = FieldSpec {
            name: field.clone(),
            ty: context_ty.clone(),
            modifiers: vec![Modifier::Private, Modifier::Final],
        };
        let constructor = ConstructorSpec {
            modifiers: vec![Modifier::Public],
            params: vec![ParamSpec {
                name: field.clone(),
                ty: context_ty,
                annotations: Vec::new(),
            }],
            body: vec![Stmt::Assign {
                target: Expr::This.field(field.clone()),
                value: Expr::local(field),
            }],
        };

        CompilationUnit {
            header: self.config.header_comment.clone(),
            class: ClassSpec {
                name: self.config.unit_class(),
                modifiers: vec![Modifier::Public],
                fields: vec![context_field],
                constructors: vec![constructor],
                methods,
            },
        }
    }
}
