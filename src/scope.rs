use oxc_ast::ast::Expression;

// ═══════════════════════════════════════════════════════════════════════════════
// SCOPE ARENA
// Lexical scopes with parent links, each carrying an optional inherited
// block-name binding. Exited scopes stay in the arena; only `current`
// moves, so sibling scopes never see each other's bindings.
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
struct ScopeData<'a> {
    parent: Option<usize>,
    bem_block: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct ScopeArena<'a> {
    scopes: Vec<ScopeData<'a>>,
    current: usize,
}

impl<'a> ScopeArena<'a> {
    pub fn new() -> Self {
        ScopeArena {
            scopes: vec![ScopeData {
                parent: None,
                bem_block: None,
            }],
            current: 0,
        }
    }

    pub fn enter(&mut self) {
        self.scopes.push(ScopeData {
            parent: Some(self.current),
            bem_block: None,
        });
        self.current = self.scopes.len() - 1;
    }

    pub fn exit(&mut self) {
        if let Some(parent) = self.scopes[self.current].parent {
            self.current = parent;
        }
    }

    /// Bind the active block for the current scope, overwriting any prior
    /// binding at this scope. Later sibling calls therefore see the most
    /// recently declared block.
    pub fn bind_block(&mut self, block: Expression<'a>) {
        self.scopes[self.current].bem_block = Some(block);
    }

    /// The nearest binding in the current scope or any ancestor.
    pub fn resolve_block(&self) -> Option<&Expression<'a>> {
        let mut idx = self.current;
        loop {
            if let Some(block) = &self.scopes[idx].bem_block {
                return Some(block);
            }
            idx = self.scopes[idx].parent?;
        }
    }
}

impl<'a> Default for ScopeArena<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_ast::AstBuilder;
    use oxc_span::SPAN;

    fn string_expr<'a>(ast: &AstBuilder<'a>, value: &'static str) -> Expression<'a> {
        ast.expression_string_literal(SPAN, value, None)
    }

    fn resolved_value(arena: &ScopeArena) -> Option<String> {
        arena.resolve_block().map(|expr| match expr {
            Expression::StringLiteral(s) => s.value.to_string(),
            other => panic!("expected a string literal, got {:?}", other),
        })
    }

    #[test]
    fn test_root_starts_unbound() {
        let arena = ScopeArena::new();
        assert!(arena.resolve_block().is_none());
    }

    #[test]
    fn test_inner_scope_inherits_outer_binding() {
        let allocator = Allocator::default();
        let ast = AstBuilder::new(&allocator);
        let mut arena = ScopeArena::new();
        arena.bind_block(string_expr(&ast, "outer"));
        arena.enter();
        assert_eq!(resolved_value(&arena).as_deref(), Some("outer"));
    }

    #[test]
    fn test_inner_binding_shadows_and_unwinds() {
        let allocator = Allocator::default();
        let ast = AstBuilder::new(&allocator);
        let mut arena = ScopeArena::new();
        arena.bind_block(string_expr(&ast, "outer"));
        arena.enter();
        arena.bind_block(string_expr(&ast, "inner"));
        assert_eq!(resolved_value(&arena).as_deref(), Some("inner"));
        arena.exit();
        assert_eq!(resolved_value(&arena).as_deref(), Some("outer"));
    }

    #[test]
    fn test_sibling_scopes_are_isolated() {
        let allocator = Allocator::default();
        let ast = AstBuilder::new(&allocator);
        let mut arena = ScopeArena::new();
        arena.enter();
        arena.bind_block(string_expr(&ast, "first"));
        arena.exit();
        arena.enter();
        assert!(arena.resolve_block().is_none());
    }

    #[test]
    fn test_rebinding_overwrites_at_same_scope() {
        let allocator = Allocator::default();
        let ast = AstBuilder::new(&allocator);
        let mut arena = ScopeArena::new();
        arena.bind_block(string_expr(&ast, "a"));
        arena.bind_block(string_expr(&ast, "z"));
        assert_eq!(resolved_value(&arena).as_deref(), Some("z"));
    }
}
