//! Runtime type-token synthesis.
//!
//! Emits the statements that rebuild a reflected `Type` for a parameter so the value
//! converter sees full generic information. Tokens are bound to locals named
//! `type{param}{arg}{depth}`; arguments are built before the type that wraps them.

use sb_core::ir::{Expr, Stmt};
use sb_core::{RuntimeApi, Ty};

use crate::names::NameAllocator;

const TOKEN_GET: &str = "get";
const TOKEN_GET_PARAMETERIZED: &str = "getParameterized";
const TOKEN_GET_ARRAY: &str = "getArray";
const TOKEN_GET_TYPE: &str = "getType";

/// Position of one token in a method's synthesis tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSlot {
    pub param: usize,
    pub arg: usize,
    pub depth: usize,
}

impl TokenSlot {
    pub fn root(param: usize) -> Self {
        Self {
            param,
            arg: 0,
            depth: 0,
        }
    }

    fn child(self, arg: usize) -> Self {
        Self {
            param: self.param,
            arg,
            depth: self.depth + 1,
        }
    }

    pub fn suggested_name(self) -> String {
        format!("type{}{}{}", self.param, self.arg, self.depth)
    }
}

/// The part of a type that has no runtime class to name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedType {
    pub reason: String,
}

pub struct TypeTokenSynthesizer<'c> {
    runtime: &'c RuntimeApi,
}

impl<'c> TypeTokenSynthesizer<'c> {
    pub fn new(runtime: &'c RuntimeApi) -> Self {
        Self { runtime }
    }

    /// Append the token statements for `ty` to `out` and return the name of the local
    /// holding the outermost token.
    pub fn synthesize(
        &self,
        ty: &Ty,
        slot: TokenSlot,
        names: &mut NameAllocator,
        out: &mut Vec<Stmt>,
    ) -> Result<String, UnsupportedType> {
        let token = match ty {
            Ty::Class(_) | Ty::Primitive(_) => self.class_token(ty),
            Ty::Array(_) if !ty.is_generic() => self.class_token(ty),
            Ty::Array(component) => {
                let component = self.synthesize(component, slot.child(0), names, out)?;
                Expr::static_call(
                    self.runtime.type_token_class.clone(),
                    TOKEN_GET_ARRAY,
                    vec![Expr::local(component)],
                )
            }
            Ty::Parameterized(p) => {
                if p.args.is_empty() {
                    return Err(UnsupportedType {
                        reason: format!("`{}` is parameterized without type arguments", p.raw),
                    });
                }
                let mut args = vec![Expr::ClassLiteral(Ty::Class(p.raw.clone()))];
                for (index, arg) in p.args.iter().enumerate() {
                    let name = self.synthesize(arg, slot.child(index), names, out)?;
                    args.push(Expr::local(name));
                }
                Expr::static_call(
                    self.runtime.type_token_class.clone(),
                    TOKEN_GET_PARAMETERIZED,
                    args,
                )
            }
            Ty::Variable(name) => {
                return Err(UnsupportedType {
                    reason: format!("type variable `{name}` has no runtime class"),
                })
            }
            Ty::Wildcard(_) => {
                return Err(UnsupportedType {
                    reason: format!("wildcard `{ty}` has no runtime class"),
                })
            }
        };
        let name = names.allocate(&slot.suggested_name());
        out.push(Stmt::local(
            Ty::Class(self.runtime.reflect_type_class.clone()),
            name.clone(),
            token.call(TOKEN_GET_TYPE, Vec::new()),
        ));
        Ok(name)
    }

    fn class_token(&self, ty: &Ty) -> Expr {
        Expr::static_call(
            self.runtime.type_token_class.clone(),
            TOKEN_GET,
            vec![Expr::ClassLiteral(ty.clone())],
        )
    }
}
