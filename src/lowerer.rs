//! BEM descriptor lowering.

use oxc_allocator::{Allocator, Box as oxc_box, CloneIn};
use oxc_ast::ast::*;
use oxc_ast::AstBuilder;
use oxc_ast_visit::walk_mut::{
    walk_arrow_function_expression, walk_block_statement, walk_expression, walk_function,
    walk_statement,
};
use oxc_ast_visit::VisitMut;
use oxc_span::{GetSpan, Span, SPAN};
use oxc_syntax::scope::ScopeFlags;

use crate::descriptor::get_value;
use crate::errors::{
    RewriteError, ERR_ARGUMENT_COUNT, ERR_ARGUMENT_SHAPE, ERR_BLOCK_UNRESOLVED, ERR_PROPERTY_KIND,
};
use crate::options::{BemOptions, TargetCallee};
use crate::scope::ScopeArena;

// ═══════════════════════════════════════════════════════════════════════════════
// BEM LOWERER
// Rewrites BEM({tag, block, elem, mods, props, content}) calls into
// element-factory calls with className computed via buildClassName(...)
// ═══════════════════════════════════════════════════════════════════════════════

pub struct BemLowerer<'a> {
    pub ast: AstBuilder<'a>,
    source_text: &'a str,
    file_path: String,
    target: TargetCallee,
    strict: bool,
    scopes: ScopeArena<'a>,
    error: Option<RewriteError>,
}

/// One resolved slot of an element's children. A spread slot stays a
/// spread, both in the variadic call position and inside array literals.
enum Child<'a> {
    Node(Expression<'a>),
    Spread(Expression<'a>),
}

impl<'a> BemLowerer<'a> {
    pub fn new(
        allocator: &'a Allocator,
        source_text: &'a str,
        file_path: &str,
        target: TargetCallee,
        strict: bool,
    ) -> Self {
        Self {
            ast: AstBuilder::new(allocator),
            source_text,
            file_path: file_path.to_string(),
            target,
            strict,
            scopes: ScopeArena::new(),
            error: None,
        }
    }

    pub fn from_options(
        allocator: &'a Allocator,
        source_text: &'a str,
        file_path: &str,
        options: &BemOptions,
    ) -> Result<Self, RewriteError> {
        let target = TargetCallee::parse(&options.pragma, file_path)?;
        Ok(Self::new(
            allocator,
            source_text,
            file_path,
            target,
            options.strict,
        ))
    }

    /// The first hard failure, if any. Once set, the lowerer stops
    /// rewriting; a partially rewritten tree is never surfaced as success.
    pub fn take_error(&mut self) -> Option<RewriteError> {
        self.error.take()
    }

    fn err(&self, code: &str, message: &str, span: Span) -> RewriteError {
        RewriteError::at_offset(code, message, &self.file_path, self.source_text, span.start)
    }

    fn is_bem_call(call: &CallExpression<'a>) -> bool {
        matches!(&call.callee, Expression::Identifier(id) if id.name == "BEM")
    }

    /// Validates a BEM(...) call site, resolves the ambient block through
    /// the scope chain, and builds the replacement expression. `Ok(None)`
    /// means "leave the call untouched" (permissive mode, non-object
    /// argument).
    fn rewrite_call(
        &mut self,
        call: &CallExpression<'a>,
    ) -> Result<Option<Expression<'a>>, RewriteError> {
        if call.arguments.len() != 1 {
            return Err(self.err(ERR_ARGUMENT_COUNT, "should be only one argument", call.span));
        }

        let descriptor = match &call.arguments[0] {
            Argument::ObjectExpression(obj) => obj,
            other => {
                if self.strict {
                    return Err(self.err(ERR_ARGUMENT_SHAPE, "should be object", other.span()));
                }
                return Ok(None);
            }
        };

        let allocator = self.ast.allocator;
        let block = match get_value(&descriptor.properties, "block") {
            Some(explicit) => {
                self.scopes.bind_block(explicit.clone_in(allocator));
                Some(explicit.clone_in(allocator))
            }
            None => self.scopes.resolve_block().map(|b| b.clone_in(allocator)),
        };

        self.create_element(descriptor, block.as_ref()).map(Some)
    }

    /// Builds one element-factory call from a descriptor and the inherited
    /// block: `callee(tag, {props..., className}, ...children)`.
    fn create_element(
        &self,
        descriptor: &ObjectExpression<'a>,
        inherited_block: Option<&Expression<'a>>,
    ) -> Result<Expression<'a>, RewriteError> {
        let allocator = self.ast.allocator;
        let fields = &descriptor.properties;

        let tag = match get_value(fields, "tag") {
            Some(tag) => tag.clone_in(allocator),
            None => self.ast.expression_string_literal(SPAN, "div", None),
        };

        let block = match get_value(fields, "block") {
            Some(own) => Some(own.clone_in(allocator)),
            None => inherited_block.map(|b| b.clone_in(allocator)),
        };
        if block.is_none() && self.strict {
            return Err(self.err(ERR_BLOCK_UNRESOLVED, "no block", descriptor.span));
        }

        let children = self.resolve_content(block.as_ref(), get_value(fields, "content"))?;

        // Props are re-homed as fresh property nodes; node identity is
        // positional in the output tree, so originals are never reused.
        let mut out_props = self.ast.vec();
        if let Some(bag) = get_value(fields, "props") {
            let Expression::ObjectExpression(bag) = bag else {
                return Err(self.err(
                    ERR_PROPERTY_KIND,
                    "props must be an object literal",
                    bag.span(),
                ));
            };
            for prop in &bag.properties {
                match prop {
                    ObjectPropertyKind::ObjectProperty(p) => {
                        if p.kind != PropertyKind::Init || p.method {
                            return Err(self.err(
                                ERR_PROPERTY_KIND,
                                "wrong type of property",
                                p.span,
                            ));
                        }
                        out_props.push(self.ast.object_property_kind_object_property(
                            SPAN,
                            PropertyKind::Init,
                            p.key.clone_in(allocator),
                            p.value.clone_in(allocator),
                            false,
                            false,
                            p.computed,
                        ));
                    }
                    ObjectPropertyKind::SpreadProperty(spread) => {
                        if self.strict {
                            return Err(self.err(
                                ERR_PROPERTY_KIND,
                                "wrong type of property",
                                spread.span,
                            ));
                        }
                        out_props.push(
                            self.ast.object_property_kind_spread_property(
                                SPAN,
                                spread.argument.clone_in(allocator),
                            ),
                        );
                    }
                }
            }
        }
        out_props.push(
            self.init_property("className", self.class_name_call(block.as_ref(), fields)),
        );

        let mut args = self.ast.vec();
        args.push(Argument::from(tag));
        args.push(Argument::from(self.ast.expression_object(SPAN, out_props)));
        for child in children {
            match child {
                Child::Node(expr) => args.push(Argument::from(expr)),
                Child::Spread(expr) => args.push(Argument::SpreadElement(
                    self.ast.alloc(self.ast.spread_element(SPAN, expr)),
                )),
            }
        }

        Ok(self.ast.expression_call(
            SPAN,
            self.build_callee(),
            None::<oxc_box<TSTypeParameterInstantiation>>,
            args,
            false,
        ))
    }

    /// `buildClassName({block, elem?, mods?})` in that key order, or an
    /// empty-string literal when no block is resolvable (permissive mode
    /// reaches this; strict mode has already failed in `create_element`).
    fn class_name_call(
        &self,
        block: Option<&Expression<'a>>,
        fields: &[ObjectPropertyKind<'a>],
    ) -> Expression<'a> {
        let Some(block) = block else {
            return self.ast.expression_string_literal(SPAN, "", None);
        };
        let allocator = self.ast.allocator;

        let mut options = self.ast.vec();
        options.push(self.init_property("block", block.clone_in(allocator)));
        if let Some(elem) = get_value(fields, "elem") {
            options.push(self.init_property("elem", elem.clone_in(allocator)));
        }
        if let Some(mods) = get_value(fields, "mods") {
            options.push(self.init_property("mods", mods.clone_in(allocator)));
        }

        let mut args = self.ast.vec();
        args.push(Argument::from(self.ast.expression_object(SPAN, options)));
        self.ast.expression_call(
            SPAN,
            self.ast.expression_identifier(SPAN, "buildClassName"),
            None::<oxc_box<TSTypeParameterInstantiation>>,
            args,
            false,
        )
    }

    /// Normalizes a descriptor's `content` field into a (possibly empty)
    /// sequence of children. Absent content is a single explicit `null`
    /// child, not an empty sequence.
    fn resolve_content(
        &self,
        block: Option<&Expression<'a>>,
        content: Option<&Expression<'a>>,
    ) -> Result<Vec<Child<'a>>, RewriteError> {
        match content {
            None => Ok(vec![Child::Node(self.ast.expression_null_literal(SPAN))]),
            Some(Expression::ArrayExpression(array)) => array
                .elements
                .iter()
                .map(|slot| self.resolve_slot(block, slot))
                .collect(),
            Some(expr) => Ok(vec![Child::Node(self.resolve_child(block, expr)?)]),
        }
    }

    fn resolve_slot(
        &self,
        block: Option<&Expression<'a>>,
        slot: &ArrayExpressionElement<'a>,
    ) -> Result<Child<'a>, RewriteError> {
        if let ArrayExpressionElement::SpreadElement(spread) = slot {
            return Ok(Child::Spread(spread.argument.clone_in(self.ast.allocator)));
        }
        match slot.as_expression() {
            Some(expr) => Ok(Child::Node(self.resolve_child(block, expr)?)),
            // array hole
            None => Ok(Child::Node(self.ast.expression_null_literal(SPAN))),
        }
    }

    fn resolve_child(
        &self,
        block: Option<&Expression<'a>>,
        expr: &Expression<'a>,
    ) -> Result<Expression<'a>, RewriteError> {
        match expr {
            Expression::StringLiteral(_) => Ok(expr.clone_in(self.ast.allocator)),
            // A nested descriptor inherits the surrounding block.
            Expression::ObjectExpression(descriptor) => self.create_element(descriptor, block),
            // A nested array slot stays one array-valued child; sequences
            // are never flattened through each other.
            Expression::ArrayExpression(array) => {
                let mut elements = self.ast.vec();
                for slot in &array.elements {
                    match self.resolve_slot(block, slot)? {
                        Child::Node(e) => elements.push(ArrayExpressionElement::from(e)),
                        Child::Spread(e) => elements.push(ArrayExpressionElement::SpreadElement(
                            self.ast.alloc(self.ast.spread_element(SPAN, e)),
                        )),
                    }
                }
                Ok(self.ast.expression_array(SPAN, elements))
            }
            // Anything else is already a valid child expression.
            _ => Ok(expr.clone_in(self.ast.allocator)),
        }
    }

    fn init_property(&self, name: &'static str, value: Expression<'a>) -> ObjectPropertyKind<'a> {
        self.ast.object_property_kind_object_property(
            SPAN,
            PropertyKind::Init,
            PropertyKey::StaticIdentifier(self.ast.alloc(self.ast.identifier_name(SPAN, name))),
            value,
            false,
            false,
            false,
        )
    }

    /// Fresh callee nodes for one emit site, from the pass-level resolved
    /// dotted path.
    fn build_callee(&self) -> Expression<'a> {
        let segments = self.target.segments();
        let head: &'a str = self.ast.allocator.alloc_str(&segments[0]);
        let mut callee = self.ast.expression_identifier(SPAN, head);
        for segment in &segments[1..] {
            let name: &'a str = self.ast.allocator.alloc_str(segment);
            callee = Expression::from(self.ast.member_expression_static(
                SPAN,
                callee,
                self.ast.identifier_name(SPAN, name),
                false,
            ));
        }
        callee
    }
}

impl<'a> VisitMut<'a> for BemLowerer<'a> {
    fn visit_statement(&mut self, stmt: &mut Statement<'a>) {
        if self.error.is_some() {
            return;
        }
        walk_statement(self, stmt);
    }

    fn visit_expression(&mut self, expr: &mut Expression<'a>) {
        if self.error.is_some() {
            return;
        }

        let rewritten = match &*expr {
            Expression::CallExpression(call) if Self::is_bem_call(call) => {
                Some(self.rewrite_call(call))
            }
            _ => None,
        };

        match rewritten {
            Some(Ok(Some(replacement))) => {
                *expr = replacement;
                // The Babel driver requeues replaced nodes; re-walk so BEM
                // calls carried through props or pass-through content are
                // also rewritten.
                walk_expression(self, expr);
            }
            Some(Ok(None)) | None => walk_expression(self, expr),
            Some(Err(error)) => self.error = Some(error),
        }
    }

    fn visit_block_statement(&mut self, block: &mut BlockStatement<'a>) {
        self.scopes.enter();
        walk_block_statement(self, block);
        self.scopes.exit();
    }

    fn visit_function(&mut self, func: &mut Function<'a>, flags: ScopeFlags) {
        self.scopes.enter();
        walk_function(self, func, flags);
        self.scopes.exit();
    }

    fn visit_arrow_function_expression(&mut self, arrow: &mut ArrowFunctionExpression<'a>) {
        self.scopes.enter();
        walk_arrow_function_expression(self, arrow);
        self.scopes.exit();
    }
}
