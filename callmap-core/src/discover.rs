//! Callable construct discovery from the AST
//!
//! Global invariants enforced:
//! - Pre-order traversal: a construct is recorded before anything nested in it
//! - Every child of every node is visited, whether or not the node was recorded
//!
//! Recorded constructs:
//! - Function declarations (`FnDecl`, and `export default function`)
//! - Function and arrow expressions bound directly to an identifier by a
//!   variable declarator (`VarDeclarator`)
//! - Class constructors, methods, getters, and setters (`Constructor`,
//!   `ClassMethod`, `PrivateMethod`)
//!
//! Traversed but not recorded:
//! - Function expressions in any other position (callbacks, IIFEs,
//!   object literal values, assignments)
//! - Destructured and default-parameter bindings
//! - Object literal methods and class property initializers

use crate::record::{CallableKind, CallableRecord, MethodRole};
use swc_common::{SourceMap, Span};
use swc_ecma_ast::*;
use swc_ecma_visit::{Visit, VisitWith};

/// Collect all callable constructs from a module in pre-order
pub fn discover_callables(
    module: &Module,
    file: &str,
    source_map: &SourceMap,
) -> Vec<CallableRecord> {
    let mut collector = CallableCollector {
        file,
        source_map,
        records: Vec::new(),
    };

    module.visit_with(&mut collector);

    collector.records
}

/// Visitor that records callable constructs as it descends
///
/// Node kinds it does not override fall through to `visit_children_with`,
/// so unknown shapes are always traversed.
struct CallableCollector<'a> {
    file: &'a str,
    source_map: &'a SourceMap,
    records: Vec<CallableRecord>,
}

impl CallableCollector<'_> {
    fn record(&mut self, name: Option<String>, span: Span, kind: CallableKind) {
        let line = self.source_map.lookup_char_pos(span.lo).line as u32;
        self.records.push(CallableRecord::new(name, self.file, line, kind));
    }

    /// Classify a declarator's initializer in the context of the identifier it binds
    fn classify_bound_init(&mut self, init: &Expr, binding: &BindingIdent) {
        match init {
            // `const f = (() => {})` binds the arrow itself
            Expr::Paren(paren) => self.classify_bound_init(&paren.expr, binding),
            Expr::Fn(expr) => self.record(
                Some(binding.id.sym.to_string()),
                expr.function.span,
                CallableKind::FunctionExpression,
            ),
            Expr::Arrow(arrow) => self.record(
                Some(binding.id.sym.to_string()),
                arrow.span,
                CallableKind::ArrowFunction,
            ),
            _ => {}
        }
    }
}

impl Visit for CallableCollector<'_> {
    fn visit_fn_decl(&mut self, decl: &FnDecl) {
        self.record(
            Some(decl.ident.sym.to_string()),
            decl.function.span,
            CallableKind::FunctionDeclaration,
        );

        decl.visit_children_with(self);
    }

    fn visit_export_default_decl(&mut self, export: &ExportDefaultDecl) {
        // `export default function () {}` is a declaration that may omit its name
        if let DefaultDecl::Fn(expr) = &export.decl {
            self.record(
                expr.ident.as_ref().map(|id| id.sym.to_string()),
                expr.function.span,
                CallableKind::FunctionDeclaration,
            );
        }

        export.visit_children_with(self);
    }

    fn visit_var_declarator(&mut self, decl: &VarDeclarator) {
        if let (Pat::Ident(binding), Some(init)) = (&decl.name, &decl.init) {
            self.classify_bound_init(init, binding);
        }

        // The binding identifier holds no callables, so recording before
        // descending keeps pre-order
        decl.visit_children_with(self);
    }

    fn visit_constructor(&mut self, ctor: &Constructor) {
        self.record(
            prop_name(&ctor.key),
            ctor.span,
            CallableKind::ClassMethod(MethodRole::Constructor),
        );

        ctor.visit_children_with(self);
    }

    fn visit_class_method(&mut self, method: &ClassMethod) {
        self.record(
            prop_name(&method.key),
            method.span,
            CallableKind::ClassMethod(method_role(method.kind)),
        );

        method.visit_children_with(self);
    }

    fn visit_private_method(&mut self, method: &PrivateMethod) {
        self.record(
            Some(method.key.name.to_string()),
            method.span,
            CallableKind::ClassMethod(method_role(method.kind)),
        );

        method.visit_children_with(self);
    }
}

fn method_role(kind: MethodKind) -> MethodRole {
    match kind {
        MethodKind::Method => MethodRole::Method,
        MethodKind::Getter => MethodRole::Getter,
        MethodKind::Setter => MethodRole::Setter,
    }
}

/// Name of a class member key; `None` for computed keys
fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(str_lit) => {
            // Wtf8Atom to String via to_atom_lossy (borrows when possible)
            Some(str_lit.value.to_atom_lossy().to_string())
        }
        PropName::Num(num) => Some(num.to_string()),
        _ => None,
    }
}
