//! Safe-access chain rewriting.
//!
//! `idx(input, p => p.a.b[0].c())` becomes
//!
//! ```text
//! (_ref = input) != null ? (_ref = _ref.a) != null ? (_ref = _ref.b) != null
//!     ? (_ref = _ref[0]) != null ? _ref.c() : _ref : _ref : _ref : _ref
//! ```
//!
//! The call site is checked (`validate`), the callback body is split into a
//! root and an ordered list of links (`decompose`), and the conditional is
//! folded from the innermost link outwards (`condition`). `rewrite` ties the
//! steps together for one call site.
//!
//! Every link value is assigned to the same temporary and tested with loose
//! inequality against `null`, so `undefined` short-circuits too. Each link
//! runs at most once. A method link reads its callee through the temporary,
//! so the receiver is not bound as `this`.

mod condition;
mod decompose;
mod rewrite;
mod validate;

pub use condition::build_condition;
pub use decompose::decompose;
pub use rewrite::{ExpressionLowering, RewriteContext, rewrite};
pub use validate::validate;

use crate::transforms::ir::IRNode;
use chainc_common::{Diagnostic, DiagnosticMessage, diagnostic_messages, format_message};
use chainc_parser::parser::{NodeArena, NodeIndex};
use thiserror::Error;

/// How a member link names its property.
#[derive(Clone, Debug, PartialEq)]
pub enum MemberKey<E> {
    /// `.name`
    Name(String),
    /// `[expr]`, with `expr` taken from the enclosing scope
    Computed(E),
}

impl<E> MemberKey<E> {
    pub const fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }
}

/// One step of a chain, applied to the value of the previous step.
#[derive(Clone, Debug, PartialEq)]
pub enum AccessorLink<E> {
    ReadMember { key: MemberKey<E> },
    Invoke { arguments: Vec<E> },
}

impl<E> AccessorLink<E> {
    /// Convert the expressions carried by this link, stopping at the first error.
    pub fn try_map<F, T, Err>(self, mut f: F) -> Result<AccessorLink<T>, Err>
    where
        F: FnMut(E) -> Result<T, Err>,
    {
        Ok(match self {
            Self::ReadMember {
                key: MemberKey::Name(name),
            } => AccessorLink::ReadMember {
                key: MemberKey::Name(name),
            },
            Self::ReadMember {
                key: MemberKey::Computed(expr),
            } => AccessorLink::ReadMember {
                key: MemberKey::Computed(f(expr)?),
            },
            Self::Invoke { arguments } => AccessorLink::Invoke {
                arguments: arguments.into_iter().map(f).collect::<Result<_, _>>()?,
            },
        })
    }
}

impl AccessorLink<IRNode> {
    /// `source.name`, `source[key]` or `source(args)`.
    #[must_use]
    pub fn apply(&self, source: IRNode) -> IRNode {
        match self {
            Self::ReadMember {
                key: MemberKey::Name(name),
            } => IRNode::prop(source, name.clone()),
            Self::ReadMember {
                key: MemberKey::Computed(key),
            } => IRNode::elem(source, key.clone()),
            Self::Invoke { arguments } => IRNode::call(source, arguments.clone()),
        }
    }
}

/// A callback body split into its root and links, outermost link last.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainDescriptor<E> {
    pub root_input: E,
    pub param_name: String,
    pub links: Vec<AccessorLink<E>>,
}

impl<E> ChainDescriptor<E> {
    /// Convert the root and every link operand, in application order.
    pub fn try_map<F, T, Err>(self, mut f: F) -> Result<ChainDescriptor<T>, Err>
    where
        F: FnMut(E) -> Result<T, Err>,
    {
        let root_input = f(self.root_input)?;
        let links = self
            .links
            .into_iter()
            .map(|link| link.try_map(&mut f))
            .collect::<Result<_, _>>()?;
        Ok(ChainDescriptor {
            root_input,
            param_name: self.param_name,
            links,
        })
    }
}

/// The pieces of a well-formed `callee(input, param => body)` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteRequest {
    pub call: NodeIndex,
    pub callee_name: String,
    pub input_expression: NodeIndex,
    pub param_name: String,
    pub body_expression: NodeIndex,
}

/// The temporary a rewritten site needs declared in its enclosing scope.
#[derive(Clone, Debug, PartialEq)]
pub struct TempDeclaration {
    pub name: String,
    pub initializer: Option<IRNode>,
}

/// Replacement expression for one call site.
#[derive(Clone, Debug, PartialEq)]
pub struct RewriteResult {
    pub replacement: IRNode,
    /// `None` when the chain has no links and the input is returned as is.
    pub temp_declaration: Option<TempDeclaration>,
}

/// Why a call site cannot be rewritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewriteErrorKind {
    WrongArgumentCount,
    SecondArgumentNotFunction,
    BodyNotExpression,
    WrongParameterCount,
    ParameterNotIdentifier,
    RootMismatch,
    UnsupportedOperation,
    NestingTooDeep,
}

impl RewriteErrorKind {
    #[must_use]
    pub const fn message(self) -> &'static DiagnosticMessage {
        match self {
            Self::WrongArgumentCount => &diagnostic_messages::WRONG_ARGUMENT_COUNT,
            Self::SecondArgumentNotFunction => &diagnostic_messages::SECOND_ARGUMENT_NOT_FUNCTION,
            Self::BodyNotExpression => &diagnostic_messages::BODY_NOT_EXPRESSION,
            Self::WrongParameterCount => &diagnostic_messages::WRONG_PARAMETER_COUNT,
            Self::ParameterNotIdentifier => &diagnostic_messages::PARAMETER_NOT_IDENTIFIER,
            Self::RootMismatch => &diagnostic_messages::ROOT_MISMATCH,
            Self::UnsupportedOperation => &diagnostic_messages::UNSUPPORTED_OPERATION,
            Self::NestingTooDeep => &diagnostic_messages::NESTING_TOO_DEEP,
        }
    }

    #[must_use]
    pub const fn code(self) -> u32 {
        self.message().code
    }
}

fn render_message(kind: &RewriteErrorKind, callee: &str) -> String {
    format_message(kind.message().message, &[callee])
}

/// A rejected call site, located at the offending node.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}", render_message(.kind, .callee))]
pub struct RewriteError {
    pub kind: RewriteErrorKind,
    pub node: NodeIndex,
    /// Name the call site was written with, for the message.
    pub callee: String,
}

impl RewriteError {
    #[must_use]
    pub fn new(kind: RewriteErrorKind, node: NodeIndex, callee: impl Into<String>) -> Self {
        Self {
            kind,
            node,
            callee: callee.into(),
        }
    }

    #[must_use]
    pub fn to_diagnostic(&self, file: &str, arena: &NodeArena) -> Diagnostic {
        let span = arena.span_of(self.node);
        Diagnostic::from_message(
            file.to_string(),
            span.start,
            span.len(),
            self.kind.message(),
            &[&self.callee],
        )
    }
}

#[cfg(test)]
#[path = "../../../tests/safe_chain_tests.rs"]
mod tests;
