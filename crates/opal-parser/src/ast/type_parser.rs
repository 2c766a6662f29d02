//! Type specifier parsing for Opal.
//!
//! A type specifier is a modifier run, an indirection prefix, a base
//! (primitive, named, or parenthesized compound), and an optional angle
//! suffix holding either a fixed byte size or generic argument
//! expressions.

use super::expr_parser::parse_int;
use super::parser::Parser;
use crate::ast::Ident;
use crate::ast::types::{Indirection, Modifiers, PrimitiveType, TypeBase, TypeExpr, TypeSuffix};
use crate::lexer::TokenKind;
use bumpalo::collections::Vec as BVec;
use opal_core::{DiagCode, Diagnostic, Span};

impl<'ast> Parser<'ast> {
    /// Parse a complete type specifier.
    pub(crate) fn parse_type(&mut self) -> Result<TypeExpr<'ast>, Diagnostic> {
        let start = self.peek().span;

        let mut modifiers = Modifiers::empty();
        while let Some(m) = Modifiers::from_token(self.peek().kind) {
            self.advance();
            modifiers |= m;
        }

        // Prefixes are mutually exclusive; the last one parsed wins.
        let mut indirection = Indirection::None;
        while let Some(prefix) = Indirection::from_token(self.peek().kind) {
            self.advance();
            indirection = prefix;
        }

        let base = self.parse_type_base(modifiers, indirection)?;
        if matches!(base, TypeBase::Compound(_)) {
            // Distributed onto the components, not kept on the outer type.
            modifiers = Modifiers::empty();
            indirection = Indirection::None;
        }

        let suffix = if self.check(TokenKind::Less) {
            Some(self.parse_angle_suffix()?)
        } else {
            None
        };

        Ok(TypeExpr {
            modifiers,
            indirection,
            base,
            suffix,
            span: start.merge(self.previous_span()),
        })
    }

    fn parse_type_base(
        &mut self,
        modifiers: Modifiers,
        indirection: Indirection,
    ) -> Result<TypeBase<'ast>, Diagnostic> {
        let token = self.peek();

        if let Some(prim) = PrimitiveType::from_token(token.kind) {
            self.advance();
            return Ok(TypeBase::Primitive(prim));
        }

        match token.kind {
            TokenKind::Identifier => {
                self.advance();
                Ok(TypeBase::Named(Ident::new(token.text, token.span)))
            }

            // A parenthesized compound. The outer modifiers distribute
            // onto every component; the outer indirection applies only
            // to components without a prefix of their own.
            TokenKind::LeftParen => {
                self.advance();

                let mut components = BVec::new_in(self.arena);
                loop {
                    let mut component = self.parse_type()?;
                    component.modifiers |= modifiers;
                    if component.indirection == Indirection::None {
                        component.indirection = indirection;
                    }
                    components.push(component);
                    if self.eat(TokenKind::Comma).is_none() {
                        break;
                    }
                }
                self.expect(TokenKind::RightParen)?;

                Ok(TypeBase::Compound(self.arena.alloc_slice_copy(&components)))
            }

            _ => Err(Diagnostic::expected_type(
                token.span,
                token.kind.description(),
            )),
        }
    }

    /// Angle suffix: a lone integer literal is a fixed byte size,
    /// anything else is a generic argument list. Disambiguated by
    /// speculation so `List<n>` with an identifier falls through to the
    /// argument reading.
    fn parse_angle_suffix(&mut self) -> Result<TypeSuffix<'ast>, Diagnostic> {
        if let Some(token) = self.speculate(|p| {
            p.expect(TokenKind::Less)?;
            let token = p.expect(TokenKind::IntLiteral)?;
            p.expect_close_angle()?;
            Ok(token)
        }) {
            let value = parse_int(token.text);
            if !(1..=255).contains(&value) {
                return Err(Diagnostic::new(
                    DiagCode::InvalidExpression,
                    token.span,
                    format!("type size must be between 1 and 255, found {}", token.text),
                ));
            }
            return Ok(TypeSuffix::Size(value as u8));
        }

        self.expect(TokenKind::Less)?;
        let mut args = BVec::new_in(self.arena);
        loop {
            args.push(*self.parse_angle_arg()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect_close_angle()?;

        Ok(TypeSuffix::Args(self.arena.alloc_slice_copy(&args)))
    }

    fn expect_close_angle(&mut self) -> Result<Span, Diagnostic> {
        let token = self.peek();
        if token.kind != TokenKind::Greater {
            return Err(Diagnostic::expected_token(
                token.span,
                "'>'",
                token.kind.description(),
            ));
        }
        self.advance();
        Ok(token.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    fn ty<'a>(source: &str, arena: &'a Bump) -> TypeExpr<'a> {
        Parser::type_expr(source, arena).unwrap()
    }

    #[test]
    fn primitive_base() {
        let arena = Bump::new();
        let t = ty("int", &arena);
        assert_eq!(t.base, TypeBase::Primitive(PrimitiveType::Int));
        assert_eq!(t.indirection, Indirection::None);
    }

    #[test]
    fn named_base() {
        let arena = Bump::new();
        let t = ty("Buffer", &arena);
        assert!(matches!(t.base, TypeBase::Named(ident) if ident.name == "Buffer"));
    }

    #[test]
    fn const_pointer_with_size() {
        let arena = Bump::new();
        let t = ty("const @@Buffer<32>", &arena);

        assert!(t.is_const());
        assert_eq!(t.pointer_depth(), 2);
        assert_eq!(t.fixed_size(), Some(32));
    }

    #[test]
    fn last_indirection_prefix_wins() {
        let arena = Bump::new();
        let t = ty("@&x", &arena);
        assert_eq!(t.indirection, Indirection::Reference(1));
    }

    #[test]
    fn size_bounds_are_enforced() {
        let arena = Bump::new();
        assert!(Parser::type_expr("Buffer<0>", &arena).is_err());
        assert!(Parser::type_expr("Buffer<256>", &arena).is_err());
        assert!(Parser::type_expr("Buffer<1>", &arena).is_ok());
        assert!(Parser::type_expr("Buffer<255>", &arena).is_ok());
    }

    #[test]
    fn generic_argument_expressions() {
        let arena = Bump::new();
        let t = ty("List<n + 1, m>", &arena);

        let Some(TypeSuffix::Args(args)) = t.suffix else {
            panic!("expected generic arguments, got {:?}", t.suffix);
        };
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn lone_identifier_argument_is_not_a_size() {
        let arena = Bump::new();
        let t = ty("List<n>", &arena);
        assert!(matches!(t.suffix, Some(TypeSuffix::Args(args)) if args.len() == 1));
    }

    #[test]
    fn relational_argument_needs_parens() {
        let arena = Bump::new();
        // A bare `>` inside the argument would close the suffix early.
        assert!(Parser::type_expr("List<(a > b)>", &arena).is_ok());
        assert!(Parser::type_expr("List<a > b>", &arena).is_err());
    }

    #[test]
    fn compound_distributes_modifiers() {
        let arena = Bump::new();
        let t = ty("const (int, float, @Node)", &arena);

        assert!(!t.is_const(), "modifiers move onto the components");
        let TypeBase::Compound(components) = t.base else {
            panic!("expected compound, got {:?}", t.base);
        };
        assert_eq!(components.len(), 3);
        assert!(components.iter().all(|c| c.is_const()));
        // The component with its own prefix keeps it.
        assert_eq!(components[2].pointer_depth(), 1);
    }

    #[test]
    fn compound_distributes_indirection_onto_bare_components() {
        let arena = Bump::new();
        let t = ty("@(int, &float)", &arena);

        let TypeBase::Compound(components) = t.base else {
            panic!("expected compound, got {:?}", t.base);
        };
        assert_eq!(components[0].pointer_depth(), 1);
        assert_eq!(components[1].reference_depth(), 1);
    }

    #[test]
    fn non_type_token_is_rejected() {
        let arena = Bump::new();
        let result = Parser::type_expr("123", &arena);
        assert!(result.is_err());
        let diagnostics = result.unwrap_err();
        assert!(
            diagnostics
                .iter()
                .any(|d| d.code == DiagCode::ExpectedType)
        );
    }

    #[test]
    fn register_prefix_type() {
        let arena = Bump::new();
        let t = ty("$int", &arena);
        assert!(t.indirection.is_register());
    }

    #[test]
    fn unclosed_suffix_is_rejected() {
        let arena = Bump::new();
        assert!(Parser::type_expr("List<n", &arena).is_err());
    }
}
