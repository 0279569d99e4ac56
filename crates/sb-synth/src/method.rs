use sb_core::ir::{Doc, Expr, MethodSpec, Modifier, ParamSpec, Stmt};
use sb_core::{ActivityDescriptor, Error, GeneratorConfig, ParamDescriptor, Result, Ty};

use crate::names::{capitalize, NameAllocator};
use crate::type_token::{TokenSlot, TypeTokenSynthesizer};

const BUILDER_LOCAL: &str = "builder";
const HANDLE_LOCAL: &str = "warden";
const TO_STRING: &str = "toString";

/// Builds one springboard method for a `(template tag, parameter list)` variant.
pub struct MethodSynthesizer<'c> {
    config: &'c GeneratorConfig,
    tokens: TypeTokenSynthesizer<'c>,
}

impl<'c> MethodSynthesizer<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self {
            config,
            tokens: TypeTokenSynthesizer::new(&config.runtime),
        }
    }

    /// `prefix + ActivitySimpleName + CapitalizedTag`.
    pub fn method_name(&self, activity: &ActivityDescriptor, tag: &str) -> String {
        format!(
            "{}{}{}",
            self.config.method_prefix,
            activity.simple_name(),
            capitalize(tag)
        )
    }

    /// `Handle` without a declared result, `Handle<Result>` with one.
    pub fn return_type(&self, activity: &ActivityDescriptor) -> Ty {
        let handle = self.config.runtime.handle_class.clone();
        match &activity.result {
            Some(result) => Ty::parameterized(handle, vec![result.clone()]),
            None => Ty::Class(handle),
        }
    }

    pub fn synthesize(
        &self,
        activity: &ActivityDescriptor,
        tag: &str,
        params: &[&ParamDescriptor],
    ) -> Result<MethodSpec> {
        let runtime = &self.config.runtime;
        let url = activity.primary_url().ok_or_else(|| {
            Error::invalid_descriptor(activity.qualified_name(), "at least one url is required")
        })?;

        let mut names = NameAllocator::new();
        for param in params {
            names.reserve(param.key.clone());
        }

        let mut body = Vec::new();
        let builder = names.allocate(BUILDER_LOCAL);
        let builder_ty = Ty::Class(runtime.url_builder_class.clone());
        body.push(Stmt::local(
            builder_ty.clone(),
            builder.clone(),
            Expr::new_instance(builder_ty, Vec::new()),
        ));
        body.push(Stmt::Expr(Expr::local(&builder).call(
            runtime.set_address_method.clone(),
            vec![Expr::string(url)],
        )));

        for (index, param) in params.iter().enumerate() {
            let token = self
                .tokens
                .synthesize(&param.ty, TokenSlot::root(index), &mut names, &mut body)
                .map_err(|unsupported| Error::UnsupportedType {
                    activity: activity.qualified_name(),
                    param: param.key.clone(),
                    ty: param.ty.to_string(),
                    reason: unsupported.reason,
                })?;
            let wire = Expr::static_call(
                runtime.converter_class.clone(),
                runtime.converter_method.clone(),
                vec![Expr::local(token), Expr::local(param.key.clone())],
            );
            body.push(Stmt::Expr(Expr::local(&builder).call(
                runtime.add_param_method.clone(),
                vec![Expr::string(param.key.clone()), wire],
            )));
        }

        let handle = names.allocate(HANDLE_LOCAL);
        let handle_class = Ty::Class(runtime.handle_class.clone());
        let init = match &activity.result {
            None => Expr::new_instance(handle_class, Vec::new()),
            Some(result) => Expr::new_diamond(
                handle_class,
                vec![Expr::new_instance(result.clone(), Vec::new())],
            ),
        };
        let returns = self.return_type(activity);
        body.push(Stmt::local(returns.clone(), handle.clone(), init));

        let address = Expr::local(&builder)
            .call(runtime.build_method.clone(), Vec::new())
            .call(TO_STRING, Vec::new());
        body.push(Stmt::Expr(Expr::static_call(
            runtime.navigator_class.clone(),
            runtime.navigator_method.clone(),
            vec![
                Expr::This.field(self.config.context_field.clone()),
                address,
                Expr::local(&handle).field(runtime.handle_listener_field.clone()),
            ],
        )));
        body.push(Stmt::Return(Expr::local(handle)));

        Ok(MethodSpec {
            name: self.method_name(activity, tag),
            modifiers: vec![Modifier::Public],
            doc: Some(Doc::new().text("springboard of ").link(activity.name.clone())),
            returns: Some(returns),
            params: params
                .iter()
                .map(|param| ParamSpec {
                    name: param.key.clone(),
                    ty: param.ty.clone(),
                    annotations: param.annotations.clone(),
                })
                .collect(),
            body,
        })
    }
}
