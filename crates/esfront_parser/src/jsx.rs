//! JSX elements and fragments.
//!
//! The lexer is switched between its JSX modes as the parser walks through a
//! tag: `JsxTag` for names and attributes, `JsxAttrValue` right after `=`,
//! `JsxChild` between tags, and back to `Normal` inside `{...}`.

use esfront_ast::node::*;
use esfront_ast::node_type::NodeType;
use esfront_ast::token_kind::TokenKind;
use esfront_core::text::TextRange;
use esfront_diagnostics::{ErrorCode, ParseError};
use esfront_lexer::{LexMode, TokenValue};

use crate::options::Features;
use crate::parser::{PResult, Parser};

/// What a `{` opened: an expression container or a spread.
enum JsxBrace<'a> {
    Container(&'a JsxExprContainer<'a>),
    Spread(&'a JsxSpreadChild<'a>),
}

/// One step through an element's children.
enum ChildOrClose<'a> {
    Child(JsxChild<'a>),
    Close(&'a JsxClosingElement<'a>),
}

/// The name of an opening tag as shown in diagnostics.
fn display_name(name: Option<JsxName<'_>>) -> String {
    match name {
        Some(name) => name.text(),
        None => "<>".to_string(),
    }
}

impl<'a> Parser<'a> {
    /// An element in expression position. A second element right after the
    /// first cannot be parsed as a comparison and is reported as unwrapped.
    pub(crate) fn parse_jsx_root(&mut self) -> PResult<&'a JsxElement<'a>> {
        let element = self.parse_jsx_element()?;
        if self.at(TokenKind::Lt) {
            return Err(ParseError::new(
                ErrorCode::AdjacentJsxElementsNotWrapped,
                self.peek_range(),
                &[],
            ));
        }
        Ok(element)
    }

    fn parse_jsx_element(&mut self) -> PResult<&'a JsxElement<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::Lt)?;
        self.parse_jsx_element_after_lt(start)
    }

    fn parse_jsx_element_after_lt(&mut self, start: u32) -> PResult<&'a JsxElement<'a>> {
        let opening = self.with_mode(LexMode::JsxTag, |p| p.parse_jsx_opening_element(start))?;
        if opening.self_closing {
            return Ok(self.alloc(JsxElement {
                data: self.node(NodeType::JsxElement, start),
                opening,
                children: &[],
                closing: None,
            }));
        }

        let mut children = self.new_vec();
        let closing = loop {
            match self.with_mode(LexMode::JsxChild, |p| p.parse_jsx_child(opening))? {
                ChildOrClose::Child(child) => children.push(child),
                ChildOrClose::Close(closing) => break closing,
            }
        };

        let open_name = opening.name.map(|name| name.text());
        let close_name = closing.name.map(|name| name.text());
        if open_name != close_name {
            return Err(ParseError::new(
                ErrorCode::UnbalancedJsxTag,
                closing.data.range,
                &[&display_name(opening.name), &display_name(closing.name)],
            ));
        }

        Ok(self.alloc(JsxElement {
            data: self.node(NodeType::JsxElement, start),
            opening,
            children: children.into_bump_slice(),
            closing: Some(closing),
        }))
    }

    fn unterminated(&mut self, name: Option<JsxName<'a>>) -> ParseError {
        ParseError::new(ErrorCode::UnterminatedJsx, self.peek_range(), &[&display_name(name)])
    }

    // ========================================================================
    // Tags
    // ========================================================================

    /// The rest of an opening tag after `<`, up to and including `>` or `/>`.
    fn parse_jsx_opening_element(&mut self, start: u32) -> PResult<&'a JsxOpeningElement<'a>> {
        let name = if self.at(TokenKind::Gt) {
            None
        } else {
            Some(self.parse_jsx_element_name()?)
        };

        let mut attrs = self.new_vec();
        if name.is_some() {
            loop {
                match self.peek_kind() {
                    TokenKind::Gt | TokenKind::Slash => break,
                    TokenKind::Eof => return Err(self.unterminated(name)),
                    _ => attrs.push(self.parse_jsx_attr_item()?),
                }
            }
        }

        let self_closing = name.is_some() && self.eat(TokenKind::Slash);
        if self.at(TokenKind::Eof) {
            return Err(self.unterminated(name));
        }
        self.expect(TokenKind::Gt)?;
        Ok(self.alloc(JsxOpeningElement {
            data: self.node(NodeType::JsxOpeningElement, start),
            name,
            attrs: attrs.into_bump_slice(),
            self_closing,
        }))
    }

    /// The rest of a closing tag after `<`: `/name>` or `/>`.
    fn parse_jsx_closing_element(&mut self, start: u32) -> PResult<&'a JsxClosingElement<'a>> {
        self.expect(TokenKind::Slash)?;
        let name = if self.at(TokenKind::Gt) {
            None
        } else {
            Some(self.parse_jsx_element_name()?)
        };
        self.expect(TokenKind::Gt)?;
        Ok(self.alloc(JsxClosingElement {
            data: self.node(NodeType::JsxClosingElement, start),
            name,
        }))
    }

    fn parse_jsx_ident(&mut self) -> PResult<&'a JsxIdent<'a>> {
        if !self.at(TokenKind::JsxName) {
            return Err(self.unexpected());
        }
        let token = self.bump();
        Ok(self.alloc(JsxIdent {
            data: NodeData::new(NodeType::JsxIdent, token.range),
            name: token.raw,
        }))
    }

    /// `ns:name` when namespaces are enabled; otherwise the `:` is an
    /// unexpected token.
    fn parse_jsx_namespaced_rest(&mut self, start: u32, namespace: &'a JsxIdent<'a>) -> PResult<JsxName<'a>> {
        if !self.features.contains(Features::JSX_NAMESPACE) {
            return Err(self.unexpected());
        }
        self.expect(TokenKind::Colon)?;
        let name = self.parse_jsx_ident()?;
        Ok(JsxName::Namespaced(self.alloc(JsxNamespacedName {
            data: self.node(NodeType::JsxNamespacedName, start),
            namespace,
            name,
        })))
    }

    /// `div`, `a.b.c` or `svg:rect`.
    fn parse_jsx_element_name(&mut self) -> PResult<JsxName<'a>> {
        let start = self.peek_start();
        let first = self.parse_jsx_ident()?;
        if self.at(TokenKind::Colon) {
            return self.parse_jsx_namespaced_rest(start, first);
        }
        let mut name = JsxName::Ident(first);
        while self.eat(TokenKind::Dot) {
            let property = self.parse_jsx_ident()?;
            name = JsxName::Member(self.alloc(JsxMemberExpr {
                data: self.node(NodeType::JsxMemberExpr, start),
                object: name,
                property,
            }));
        }
        Ok(name)
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    fn parse_jsx_attr_item(&mut self) -> PResult<JsxAttrItem<'a>> {
        let start = self.peek_start();
        if self.at(TokenKind::LBrace) {
            self.bump();
            let arg = self.with_mode(LexMode::Normal, |p| {
                p.expect(TokenKind::Ellipsis)?;
                let arg = p.parse_assignment_expression()?;
                p.expect(TokenKind::RBrace)?;
                Ok(arg)
            })?;
            return Ok(JsxAttrItem::Spread(self.alloc(JsxSpreadAttr {
                data: self.node(NodeType::JsxSpreadAttr, start),
                arg,
            })));
        }

        let first = self.parse_jsx_ident()?;
        let name = if self.at(TokenKind::Colon) {
            self.parse_jsx_namespaced_rest(start, first)?
        } else {
            JsxName::Ident(first)
        };
        let value = if self.eat(TokenKind::Eq) {
            Some(self.with_mode(LexMode::JsxAttrValue, |p| p.parse_jsx_attr_value())?)
        } else {
            None
        };
        Ok(JsxAttrItem::Attr(self.alloc(JsxAttr {
            data: self.node(NodeType::JsxAttr, start),
            name,
            value,
        })))
    }

    fn parse_jsx_attr_value(&mut self) -> PResult<JsxAttrValue<'a>> {
        match self.peek_kind() {
            TokenKind::JsxString => {
                let token = self.bump();
                Ok(JsxAttrValue::Str(self.string_lit(&token)))
            }
            TokenKind::LBrace => match self.parse_jsx_brace(true)? {
                JsxBrace::Container(container) => Ok(JsxAttrValue::Expr(container)),
                JsxBrace::Spread(spread) => Err(ParseError::new(
                    ErrorCode::InvalidJsxAttribute,
                    spread.data.range,
                    &["cannot be spread into a value"],
                )),
            },
            TokenKind::Lt => Ok(JsxAttrValue::Element(self.parse_jsx_element()?)),
            _ => Err(self.unexpected()),
        }
    }

    // ========================================================================
    // Children
    // ========================================================================

    /// `{expr}`, `{}` or `{...expr}`. The braces are consumed; the inside is
    /// ordinary JavaScript. In attribute values an empty container is an
    /// error.
    fn parse_jsx_brace(&mut self, in_attr: bool) -> PResult<JsxBrace<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::LBrace)?;
        self.with_mode(LexMode::Normal, |p| {
            if p.at(TokenKind::RBrace) {
                let close = p.bump();
                if in_attr {
                    return Err(ParseError::new(
                        ErrorCode::InvalidJsxAttribute,
                        p.finish(start),
                        &["must only be assigned a non-empty expression"],
                    ));
                }
                let empty = p.alloc(JsxEmptyExpr {
                    data: NodeData::new(NodeType::JsxEmptyExpr, TextRange::new(start + 1, close.range.lo)),
                });
                return Ok(JsxBrace::Container(p.alloc(JsxExprContainer {
                    data: p.node(NodeType::JsxExprContainer, start),
                    expr: JsxExpr::Empty(empty),
                })));
            }
            let spread = p.eat(TokenKind::Ellipsis);
            let expr = p.parse_expression()?;
            p.expect(TokenKind::RBrace)?;
            if spread {
                return Ok(JsxBrace::Spread(p.alloc(JsxSpreadChild {
                    data: p.node(NodeType::JsxSpreadChild, start),
                    expr,
                })));
            }
            Ok(JsxBrace::Container(p.alloc(JsxExprContainer {
                data: p.node(NodeType::JsxExprContainer, start),
                expr: JsxExpr::Expr(expr),
            })))
        })
    }

    /// One child of `opening`, or its closing tag. Runs in `JsxChild` mode.
    fn parse_jsx_child(&mut self, opening: &'a JsxOpeningElement<'a>) -> PResult<ChildOrClose<'a>> {
        match self.peek_kind() {
            TokenKind::JsxText => {
                let token = self.bump();
                let value = match &token.value {
                    TokenValue::JsxText { value } => self.cow_str(value),
                    _ => token.raw,
                };
                Ok(ChildOrClose::Child(JsxChild::Text(self.alloc(JsxText {
                    data: NodeData::new(NodeType::JsxText, token.range),
                    raw: token.raw,
                    value,
                }))))
            }
            TokenKind::LBrace => Ok(ChildOrClose::Child(match self.parse_jsx_brace(false)? {
                JsxBrace::Container(container) => JsxChild::Expr(container),
                JsxBrace::Spread(spread) => JsxChild::Spread(spread),
            })),
            TokenKind::Lt => {
                let start = self.peek_start();
                self.bump();
                let is_closing = self.with_mode(LexMode::JsxTag, |p| Ok(p.at(TokenKind::Slash)))?;
                if is_closing {
                    let closing = self.with_mode(LexMode::JsxTag, |p| p.parse_jsx_closing_element(start))?;
                    return Ok(ChildOrClose::Close(closing));
                }
                let element = self.parse_jsx_element_after_lt(start)?;
                Ok(ChildOrClose::Child(JsxChild::Element(element)))
            }
            TokenKind::Eof => Err(self.unterminated(opening.name)),
            _ => Err(self.unexpected()),
        }
    }
}
