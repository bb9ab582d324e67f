//! Expression parsing.
//!
//! Binary operators are resolved by precedence climbing. Arrow functions and
//! TypeScript type arguments are found by speculative parsing; object and
//! array literals double as destructuring patterns and are converted when an
//! `=` follows them.

use esfront_ast::node::*;
use esfront_ast::node_type::NodeType;
use esfront_ast::token_kind::TokenKind;
use esfront_ast::types::*;
use esfront_core::text::TextRange;
use esfront_diagnostics::{ErrorCode, ParseError};
use esfront_lexer::{LexMode, TokenValue};

use crate::parser::{Context, PResult, Parser};
use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::utilities::{can_follow_type_arguments, can_start_property_key, is_simple_assign_target};

/// The part of an arrow function before `=>`.
struct ArrowHead<'a> {
    type_params: Option<&'a [TsTypeParam<'a>]>,
    params: &'a [Param<'a>],
    ret: Option<TsType<'a>>,
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Comma and assignment
    // ========================================================================

    /// `Expression`: assignment expressions separated by commas.
    pub(crate) fn parse_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.peek_start();
        let first = self.parse_assignment_expression()?;
        self.parse_sequence_rest(start, first)
    }

    /// Like [`Parser::parse_expression`], leaving shorthand initializers
    /// (`{ a = 1 }`) unchecked for a caller that may turn the result into a
    /// pattern.
    pub(crate) fn parse_expression_covered(&mut self) -> PResult<Expression<'a>> {
        let start = self.peek_start();
        let first = self.parse_assignment_expression_covered()?;
        self.parse_sequence_rest(start, first)
    }

    fn parse_sequence_rest(&mut self, start: u32, first: Expression<'a>) -> PResult<Expression<'a>> {
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }
        let mut exprs = self.new_vec();
        exprs.push(first);
        while self.eat(TokenKind::Comma) {
            let expr = self.parse_assignment_expression()?;
            exprs.push(expr);
        }
        Ok(Expression::Seq(self.alloc(SeqExpr {
            data: self.node(NodeType::SeqExpr, start),
            exprs: exprs.into_bump_slice(),
        })))
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> PResult<Expression<'a>> {
        let outer = self.cover_init.take();
        let expr = self.parse_assignment_expression_covered()?;
        if let Some(range) = self.cover_init {
            return Err(ParseError::new(ErrorCode::UnexpectedToken, range, &["="]));
        }
        self.cover_init = outer;
        Ok(expr)
    }

    pub(crate) fn parse_assignment_expression_covered(&mut self) -> PResult<Expression<'a>> {
        if self.at(TokenKind::Yield) && self.has_ctx(Context::YIELD) {
            return self.parse_yield_expression();
        }
        if let Some(arrow) = self.try_parse_arrow_function()? {
            return Ok(arrow);
        }

        let start = self.peek_start();
        let outer = self.cover_init.take();
        let left = self.parse_conditional_expression()?;
        let kind = self.peek_operator();
        let Some(op) = AssignOp::from_token(kind) else {
            self.cover_init = outer.or(self.cover_init);
            return Ok(left);
        };

        let target = if op == AssignOp::Assign {
            let target = self.to_assign_target(left)?;
            // The shorthand initializers belonged to the pattern.
            self.cover_init = outer;
            target
        } else {
            let target = self.to_simple_target(left)?;
            self.cover_init = outer.or(self.cover_init);
            target
        };
        self.bump();
        let right = self.parse_assignment_expression()?;
        Ok(Expression::Assign(self.alloc(AssignExpr {
            data: self.node(NodeType::AssignExpr, start),
            op,
            left: target,
            right,
        })))
    }

    fn parse_yield_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::Yield)?;
        let mut delegate = false;
        let mut arg = None;
        if !self.has_line_break_before() {
            delegate = self.eat(TokenKind::Star);
            if delegate || self.peek_operand().starts_expr() {
                arg = Some(self.parse_assignment_expression()?);
            }
        }
        Ok(Expression::Yield(self.alloc(YieldExpr {
            data: self.node(NodeType::YieldExpr, start),
            arg,
            delegate,
        })))
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    /// Parse an arrow function if one starts here. Returns `Ok(None)`, having
    /// consumed nothing, when the tokens are something else.
    fn try_parse_arrow_function(&mut self) -> PResult<Option<Expression<'a>>> {
        let start = self.peek_start();
        let kind = self.peek_kind();

        if kind.is_identifier_like() && self.at_identifier() && self.peek2_kind() == TokenKind::Arrow {
            let id = self.parse_identifier()?;
            let head = self.single_param_head(id);
            return self.finish_arrow(start, head, false).map(Some);
        }

        let (head, is_async) = match kind {
            TokenKind::LParen => (self.try_parse_arrow_head(|p| p.parse_arrow_head(false)), false),
            TokenKind::Lt if self.is_ts() && self.is_generic_arrow_start() => {
                (self.try_parse_arrow_head(|p| p.parse_arrow_head(false)), false)
            }
            TokenKind::Async => {
                let (next, line_break) = self.peek2();
                if line_break {
                    return Ok(None);
                }
                let head = match next {
                    TokenKind::LParen => self.try_parse_arrow_head(|p| {
                        p.bump();
                        p.parse_arrow_head(true)
                    }),
                    TokenKind::Lt if self.is_ts() => self.try_parse_arrow_head(|p| {
                        p.bump();
                        p.parse_arrow_head(true)
                    }),
                    next if next.is_identifier_like() => self.try_parse(|p| {
                        p.bump();
                        let id = p.with_context(Context::AWAIT, Context::empty(), |p| p.parse_identifier())?;
                        if !p.at(TokenKind::Arrow) {
                            return Err(p.unexpected());
                        }
                        Ok(p.single_param_head(id))
                    }),
                    _ => None,
                };
                (head, true)
            }
            _ => return Ok(None),
        };

        match head {
            Some(head) => self.finish_arrow(start, head, is_async).map(Some),
            None => Ok(None),
        }
    }

    /// Speculatively parse an arrow head starting at the upcoming token.
    /// A start offset that failed once is not tried again.
    fn try_parse_arrow_head(
        &mut self,
        f: impl FnOnce(&mut Self) -> PResult<ArrowHead<'a>>,
    ) -> Option<ArrowHead<'a>> {
        let start = self.peek_start();
        if self.failed_arrows.contains(&start) {
            return None;
        }
        let head = self.try_parse(f);
        if head.is_none() {
            self.failed_arrows.insert(start);
        }
        head
    }

    fn single_param_head(&self, id: &'a Identifier<'a>) -> ArrowHead<'a> {
        let param = Param {
            data: NodeData::new(NodeType::Param, id.data.range),
            pat: Pattern::Ident(id),
            modifiers: ModifierFlags::NONE,
        };
        ArrowHead {
            type_params: None,
            params: self.arena.alloc_slice_fill_iter([param]),
            ret: None,
        }
    }

    /// `<T>(` or, when JSX is also enabled, only `<T,>` and `<T extends`.
    fn is_generic_arrow_start(&mut self) -> bool {
        if !self.is_jsx() {
            return true;
        }
        self.look_ahead(|p| {
            p.bump();
            if !p.peek_kind().is_identifier_like() {
                return false;
            }
            p.bump();
            matches!(p.peek_kind(), TokenKind::Comma | TokenKind::Extends)
        })
    }

    fn parse_arrow_head(&mut self, is_async: bool) -> PResult<ArrowHead<'a>> {
        let type_params = if self.is_ts() && self.at(TokenKind::Lt) {
            Some(self.parse_type_params()?)
        } else {
            None
        };
        let await_ctx = if is_async { Context::AWAIT } else { Context::empty() };
        let params = self.with_context(await_ctx, Context::YIELD, |p| p.parse_formal_params(false))?;
        let ret = if self.is_ts() && self.at(TokenKind::Colon) {
            self.bump();
            Some(self.parse_type()?)
        } else {
            None
        };
        if !self.at(TokenKind::Arrow) {
            return Err(self.unexpected());
        }
        Ok(ArrowHead { type_params, params, ret })
    }

    fn finish_arrow(&mut self, start: u32, head: ArrowHead<'a>, is_async: bool) -> PResult<Expression<'a>> {
        let arrow = self.expect(TokenKind::Arrow)?;
        if arrow.after_line_term {
            return Err(ParseError::new(
                ErrorCode::RestrictedProductionViolation,
                arrow.range,
                &["before '=>'"],
            ));
        }
        let add = if is_async {
            Context::IN_FUNCTION | Context::AWAIT
        } else {
            Context::IN_FUNCTION
        };
        let remove = Context::YIELD | Context::AWAIT | Context::IN_ITERATION | Context::IN_SWITCH;
        let body = if self.at(TokenKind::LBrace) {
            ArrowBody::Block(self.with_context(add, remove | Context::NO_IN, |p| p.parse_function_body(head.params))?)
        } else {
            ArrowBody::Expr(self.with_context(add, remove, |p| p.parse_assignment_expression())?)
        };
        let typ = self.typ(TypInfo {
            type_params: head.type_params,
            annotation: head.ret,
            ..TypInfo::default()
        });
        Ok(Expression::Arrow(self.alloc(ArrowExpr {
            data: self.node(NodeType::ArrowExpr, start),
            params: head.params,
            body,
            is_async,
            typ,
        })))
    }

    // ========================================================================
    // Conditional and binary
    // ========================================================================

    fn parse_conditional_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.peek_start();
        let test = self.parse_binary_expression(OperatorPrecedence::Lowest)?;
        if !self.at(TokenKind::Question) {
            return Ok(test);
        }
        self.bump();
        let cons = self.with_context(Context::empty(), Context::NO_IN, |p| p.parse_assignment_expression())?;
        self.expect(TokenKind::Colon)?;
        let alt = self.parse_assignment_expression()?;
        Ok(Expression::Cond(self.alloc(CondExpr {
            data: self.node(NodeType::CondExpr, start),
            test,
            cons,
            alt,
        })))
    }

    /// Precedence climbing: parse an operand, then fold in every operator
    /// that binds at least as tightly as `min`.
    fn parse_binary_expression(&mut self, min: OperatorPrecedence) -> PResult<Expression<'a>> {
        let start = self.peek_start();
        let left = self.parse_unary_expression()?;
        self.parse_binary_rest(start, left, min)
    }

    fn parse_binary_rest(
        &mut self,
        start: u32,
        mut left: Expression<'a>,
        min: OperatorPrecedence,
    ) -> PResult<Expression<'a>> {
        // Set once a `<` that failed as type arguments is read as a comparison.
        let mut fallback_lt: Option<TextRange> = None;
        loop {
            let kind = self.peek_operator();
            let prec = get_binary_operator_precedence(kind, self.is_ts(), self.has_ctx(Context::NO_IN));
            if prec == OperatorPrecedence::Invalid || prec < min {
                break;
            }
            if matches!(kind, TokenKind::As | TokenKind::Satisfies) && self.has_line_break_before() {
                break;
            }
            let op_token = self.bump();
            if kind == TokenKind::Lt && self.rejected_lt == Some(op_token.range) {
                fallback_lt = Some(op_token.range);
            }

            if matches!(kind, TokenKind::As | TokenKind::Satisfies) {
                let type_ann = self.parse_type().map_err(|err| ambiguous_lt(fallback_lt, err))?;
                left = if kind == TokenKind::As {
                    Expression::TsAs(self.alloc(TsAsExpr {
                        data: self.node(NodeType::TsAsExpr, start),
                        expr: left,
                        type_ann,
                    }))
                } else {
                    Expression::TsSatisfies(self.alloc(TsSatisfiesExpr {
                        data: self.node(NodeType::TsSatisfiesExpr, start),
                        expr: left,
                        type_ann,
                    }))
                };
                continue;
            }

            if kind == TokenKind::StarStar && matches!(left, Expression::Unary(_) | Expression::Await(_)) {
                return Err(ParseError::new(ErrorCode::UnexpectedToken, op_token.range, &["**"]));
            }

            let right = self
                .parse_binary_expression(prec.next(kind.is_right_assoc()))
                .map_err(|err| ambiguous_lt(fallback_lt, err))?;
            left = self.make_binary(start, kind, op_token.range, left, right)?;
        }
        Ok(left)
    }

    fn make_binary(
        &mut self,
        start: u32,
        kind: TokenKind,
        op_range: TextRange,
        left: Expression<'a>,
        right: Expression<'a>,
    ) -> PResult<Expression<'a>> {
        if let Some(op) = LogicalOp::from_token(kind) {
            check_nullish_mix(op, op_range, left)?;
            check_nullish_mix(op, op_range, right)?;
            return Ok(Expression::Logical(self.alloc(LogicalExpr {
                data: self.node(NodeType::LogicalExpr, start),
                op,
                left,
                right,
            })));
        }
        let Some(op) = BinaryOp::from_token(kind) else {
            return Err(ParseError::new(ErrorCode::UnexpectedToken, op_range, &[kind.name()]));
        };
        Ok(Expression::Binary(self.alloc(BinaryExpr {
            data: self.node(NodeType::BinaryExpr, start),
            op,
            left,
            right,
        })))
    }

    // ========================================================================
    // Unary and postfix
    // ========================================================================

    fn parse_unary_expression(&mut self) -> PResult<Expression<'a>> {
        let kind = self.peek_operand();
        let start = self.peek_start();

        if let Some(op) = UnaryOp::from_token(kind) {
            self.bump();
            let arg = self.parse_unary_expression()?;
            if op == UnaryOp::Delete && self.is_strict() && matches!(arg.unparenthesized(), Expression::Ident(_)) {
                return Err(ParseError::new(
                    ErrorCode::StrictModeViolation,
                    self.finish(start),
                    &["Deleting an unqualified identifier"],
                ));
            }
            return Ok(Expression::Unary(self.alloc(UnaryExpr {
                data: self.node(NodeType::UnaryExpr, start),
                op,
                arg,
            })));
        }

        if let Some(op) = UpdateOp::from_token(kind) {
            self.bump();
            let arg = self.parse_unary_expression()?;
            if !is_simple_assign_target(arg) {
                return Err(ParseError::new(ErrorCode::InvalidAssignmentTarget, arg.range(), &[]));
            }
            return Ok(Expression::Update(self.alloc(UpdateExpr {
                data: self.node(NodeType::UpdateExpr, start),
                op,
                prefix: true,
                arg,
            })));
        }

        if kind == TokenKind::Await && self.has_ctx(Context::AWAIT) {
            self.bump();
            let arg = self.parse_unary_expression()?;
            return Ok(Expression::Await(self.alloc(AwaitExpr {
                data: self.node(NodeType::AwaitExpr, start),
                arg,
            })));
        }

        self.parse_postfix_expression()
    }

    fn parse_postfix_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.peek_start();
        let expr = self.parse_left_hand_side_expression()?;
        let kind = self.peek_kind();
        // A line break before `++`/`--` ends the expression; the operator then
        // starts the next statement.
        if matches!(kind, TokenKind::PlusPlus | TokenKind::MinusMinus) && !self.has_line_break_before() {
            if !is_simple_assign_target(expr) {
                return Err(ParseError::new(ErrorCode::InvalidAssignmentTarget, expr.range(), &[]));
            }
            let token = self.bump();
            let op = UpdateOp::from_token(token.kind).unwrap_or(UpdateOp::Increment);
            return Ok(Expression::Update(self.alloc(UpdateExpr {
                data: self.node(NodeType::UpdateExpr, start),
                op,
                prefix: false,
                arg: expr,
            })));
        }
        Ok(expr)
    }

    // ========================================================================
    // Calls and member access
    // ========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.peek_start();
        let expr = match self.peek_operand() {
            TokenKind::New => self.parse_new_expression()?,
            TokenKind::Super => self.parse_super()?,
            TokenKind::Import => self.parse_import_expression()?,
            _ => self.parse_primary_expression()?,
        };
        self.parse_call_tail(start, expr, false)
    }

    fn parse_super(&mut self) -> PResult<Expression<'a>> {
        let token = self.expect(TokenKind::Super)?;
        if !matches!(self.peek_kind(), TokenKind::LParen | TokenKind::Dot | TokenKind::LBracket) {
            return Err(self.unexpected());
        }
        Ok(Expression::Super(self.alloc(SuperExpr {
            data: NodeData::new(NodeType::SuperExpr, token.range),
        })))
    }

    /// `new.target`, `new C`, `new C(args)` and `new C<T>(args)`.
    fn parse_new_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.peek_start();
        let new_token = self.expect(TokenKind::New)?;
        if self.eat(TokenKind::Dot) {
            let property = self.parse_identifier_name()?;
            if property.name != "target" {
                return Err(ParseError::new(ErrorCode::UnexpectedToken, property.data.range, &[property.name]));
            }
            return Ok(Expression::MetaProp(self.alloc(MetaProp {
                data: self.node(NodeType::MetaProp, start),
                meta: self.ident_from_token(&new_token),
                property,
            })));
        }

        let callee_start = self.peek_start();
        let callee = match self.peek_operand() {
            TokenKind::New => self.parse_new_expression()?,
            TokenKind::Import => return Err(self.unexpected()),
            _ => self.parse_primary_expression()?,
        };
        let callee = self.parse_call_tail(callee_start, callee, true)?;

        let type_args = if self.is_ts() && self.at(TokenKind::Lt) {
            self.try_parse(|p| p.parse_type_args())
        } else {
            None
        };
        let args = if self.at(TokenKind::LParen) {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        let typ = self.typ(TypInfo {
            type_args,
            ..TypInfo::default()
        });
        Ok(Expression::New(self.alloc(NewExpr {
            data: self.node(NodeType::NewExpr, start),
            callee,
            args,
            typ,
        })))
    }

    /// `import.meta` and `import(source, options?)`.
    fn parse_import_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.peek_start();
        let token = self.expect(TokenKind::Import)?;
        if self.eat(TokenKind::Dot) {
            let property = self.parse_identifier_name()?;
            if property.name != "meta" {
                return Err(ParseError::new(ErrorCode::UnexpectedToken, property.data.range, &[property.name]));
            }
            if !self.is_module() {
                return Err(ParseError::new(
                    ErrorCode::IllegalStatementPosition,
                    self.finish(start),
                    &["'import.meta' outside a module"],
                ));
            }
            return Ok(Expression::MetaProp(self.alloc(MetaProp {
                data: self.node(NodeType::MetaProp, start),
                meta: self.ident_from_token(&token),
                property,
            })));
        }

        self.expect(TokenKind::LParen)?;
        let (source, options) = self.with_context(Context::empty(), Context::NO_IN, |p| {
            let source = p.parse_assignment_expression()?;
            let mut options = None;
            if p.eat(TokenKind::Comma) && !p.at(TokenKind::RParen) {
                options = Some(p.parse_assignment_expression()?);
                p.eat(TokenKind::Comma);
            }
            Ok((source, options))
        })?;
        self.expect(TokenKind::RParen)?;
        Ok(Expression::Import(self.alloc(ImportExpr {
            data: self.node(NodeType::ImportExpr, start),
            source,
            options,
        })))
    }

    /// Member accesses, calls, tagged templates and `!` after `expr`. With
    /// `no_call` (a `new` callee) calls end the chain and `?.` is an error.
    fn parse_call_tail(&mut self, start: u32, mut expr: Expression<'a>, no_call: bool) -> PResult<Expression<'a>> {
        let mut in_chain = false;
        loop {
            match self.peek_kind() {
                TokenKind::Dot => {
                    self.bump();
                    let property = self.parse_member_name()?;
                    expr = self.member(start, expr, property, false);
                }
                TokenKind::QuestionDot if no_call => return Err(self.unexpected()),
                TokenKind::QuestionDot => {
                    self.bump();
                    in_chain = true;
                    match self.peek_kind() {
                        TokenKind::LParen => {
                            let args = self.parse_arguments()?;
                            expr = self.call(start, expr, args, true, None);
                        }
                        TokenKind::LBracket => {
                            let property = self.parse_computed_member()?;
                            expr = self.member(start, expr, property, true);
                        }
                        TokenKind::Lt if self.is_ts() => {
                            let type_args = self.parse_type_args()?;
                            let args = self.parse_arguments()?;
                            let typ = self.typ(TypInfo {
                                type_args: Some(type_args),
                                ..TypInfo::default()
                            });
                            expr = self.call(start, expr, args, true, typ);
                        }
                        TokenKind::TemplateStart => return Err(self.unexpected()),
                        _ => {
                            let property = self.parse_member_name()?;
                            expr = self.member(start, expr, property, true);
                        }
                    }
                }
                TokenKind::LBracket => {
                    let property = self.parse_computed_member()?;
                    expr = self.member(start, expr, property, false);
                }
                TokenKind::TemplateStart => {
                    if in_chain {
                        return Err(self.unexpected());
                    }
                    let quasi = self.parse_template(true)?;
                    expr = self.tagged_template(start, expr, quasi, None);
                }
                TokenKind::LParen if !no_call => {
                    let args = self.parse_arguments()?;
                    expr = self.call(start, expr, args, false, None);
                }
                TokenKind::Bang if self.is_ts() && !no_call && !self.has_line_break_before() => {
                    self.bump();
                    expr = Expression::TsNonNull(self.alloc(TsNonNullExpr {
                        data: self.node(NodeType::TsNonNullExpr, start),
                        expr,
                    }));
                }
                TokenKind::Lt if self.is_ts() && !no_call => {
                    let Some(type_args) = self.try_parse_type_args_in_expression(expr) else {
                        break;
                    };
                    let typ = self.typ(TypInfo {
                        type_args: Some(type_args),
                        ..TypInfo::default()
                    });
                    expr = match self.peek_kind() {
                        TokenKind::LParen => {
                            let args = self.parse_arguments()?;
                            self.call(start, expr, args, false, typ)
                        }
                        TokenKind::TemplateStart => {
                            let quasi = self.parse_template(true)?;
                            self.tagged_template(start, expr, quasi, typ)
                        }
                        _ => match expr.as_ident() {
                            Some(id) => Expression::Ident(self.alloc(Identifier {
                                data: self.node(NodeType::Identifier, start),
                                name: id.name,
                                typ,
                            })),
                            None => expr,
                        },
                    };
                }
                _ => break,
            }
        }
        if in_chain {
            expr = Expression::Chain(self.alloc(ChainExpr {
                data: self.node(NodeType::ChainExpr, start),
                expr,
            }));
        }
        Ok(expr)
    }

    /// Speculatively read `<...>` after an expression as type arguments.
    /// They are kept only when the next token confirms them; otherwise the
    /// `<` is remembered so a failing comparison reports the ambiguity.
    fn try_parse_type_args_in_expression(&mut self, callee: Expression<'a>) -> Option<&'a [TsType<'a>]> {
        let lt = self.peek_range();
        let result = self.try_parse(|p| {
            let args = p.parse_type_args()?;
            let end = p.prev_end;
            let next = p.peek();
            let (kind, range, line_break) = (next.kind, next.range, next.after_line_term);
            // `a < b >= c` and `a < b >> c`: the closing `>` is half of an operator.
            if range.lo == end && matches!(kind, TokenKind::Gt | TokenKind::Eq | TokenKind::EqEq | TokenKind::EqEqEq) {
                return Err(p.unexpected());
            }
            let confirmed = matches!(kind, TokenKind::LParen | TokenKind::TemplateStart)
                || ((line_break || can_follow_type_arguments(kind)) && callee.as_ident().is_some());
            if !confirmed {
                return Err(p.unexpected());
            }
            Ok(args)
        });
        if result.is_none() {
            self.rejected_lt = Some(lt);
        }
        result
    }

    fn parse_member_name(&mut self) -> PResult<MemberProp<'a>> {
        if self.at(TokenKind::PrivateName) {
            let token = self.bump();
            return Ok(MemberProp::Private(self.private_name(&token)));
        }
        Ok(MemberProp::Ident(self.parse_identifier_name()?))
    }

    fn parse_computed_member(&mut self) -> PResult<MemberProp<'a>> {
        self.expect(TokenKind::LBracket)?;
        let property = self.with_context(Context::empty(), Context::NO_IN, |p| p.parse_expression())?;
        self.expect(TokenKind::RBracket)?;
        Ok(MemberProp::Computed(property))
    }

    fn member(&self, start: u32, object: Expression<'a>, property: MemberProp<'a>, optional: bool) -> Expression<'a> {
        Expression::Member(self.alloc(MemberExpr {
            data: self.node(NodeType::MemberExpr, start),
            object,
            property,
            optional,
        }))
    }

    fn call(
        &self,
        start: u32,
        callee: Expression<'a>,
        args: &'a [ExprOrSpread<'a>],
        optional: bool,
        typ: Option<&'a TypInfo<'a>>,
    ) -> Expression<'a> {
        Expression::Call(self.alloc(CallExpr {
            data: self.node(NodeType::CallExpr, start),
            callee,
            args,
            optional,
            typ,
        }))
    }

    fn tagged_template(
        &self,
        start: u32,
        tag: Expression<'a>,
        quasi: &'a TemplateLit<'a>,
        typ: Option<&'a TypInfo<'a>>,
    ) -> Expression<'a> {
        Expression::TaggedTemplate(self.alloc(TaggedTemplate {
            data: self.node(NodeType::TaggedTemplate, start),
            tag,
            quasi,
            typ,
        }))
    }

    /// `(a, ...b)` in calls and `new`.
    pub(crate) fn parse_arguments(&mut self) -> PResult<&'a [ExprOrSpread<'a>]> {
        self.expect(TokenKind::LParen)?;
        let args = self.with_context(Context::empty(), Context::NO_IN, |p| {
            let mut args = p.new_vec();
            while !p.at(TokenKind::RParen) {
                args.push(p.parse_expr_or_spread(false)?);
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            Ok(args.into_bump_slice())
        })?;
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_expr_or_spread(&mut self, covered: bool) -> PResult<ExprOrSpread<'a>> {
        let start = self.peek_start();
        let spread = self.eat(TokenKind::Ellipsis);
        let expr = if covered {
            self.parse_assignment_expression_covered()?
        } else {
            self.parse_assignment_expression()?
        };
        if !spread {
            return Ok(ExprOrSpread::Expr(expr));
        }
        Ok(ExprOrSpread::Spread(self.alloc(SpreadElement {
            data: self.node(NodeType::SpreadElement, start),
            arg: expr,
        })))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&mut self) -> PResult<Expression<'a>> {
        let kind = self.peek_operand();
        let start = self.peek_start();
        match kind {
            TokenKind::This => {
                let token = self.bump();
                Ok(Expression::This(self.alloc(ThisExpr {
                    data: NodeData::new(NodeType::ThisExpr, token.range),
                })))
            }
            TokenKind::Null => {
                let token = self.bump();
                Ok(Expression::Null(self.alloc(NullLit {
                    data: NodeData::new(NodeType::NullLit, token.range),
                })))
            }
            TokenKind::True | TokenKind::False => {
                let token = self.bump();
                Ok(Expression::Bool(self.alloc(BoolLit {
                    data: NodeData::new(NodeType::BoolLit, token.range),
                    value: kind == TokenKind::True,
                })))
            }
            TokenKind::Num => Ok(Expression::Num(self.parse_num_lit()?)),
            TokenKind::BigInt => Ok(Expression::BigInt(self.parse_bigint_lit()?)),
            TokenKind::String => Ok(Expression::Str(self.parse_string_lit()?)),
            TokenKind::RegExp => {
                let token = self.bump();
                let (pattern, flags) = match token.value {
                    TokenValue::RegExp { pattern, flags } => (pattern, flags),
                    _ => (token.raw, ""),
                };
                Ok(Expression::RegExp(self.alloc(RegExpLit {
                    data: NodeData::new(NodeType::RegExpLit, token.range),
                    pattern,
                    flags,
                })))
            }
            TokenKind::TemplateStart => Ok(Expression::Template(self.parse_template(false)?)),
            TokenKind::LParen => self.parse_paren_expression(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Function => {
                let func = self.parse_function(false, false)?;
                Ok(Expression::Function(self.alloc(FunctionExpr {
                    data: self.node(NodeType::FunctionExpr, start),
                    func,
                })))
            }
            TokenKind::Async if self.peek2() == (TokenKind::Function, false) => {
                self.bump();
                let func = self.parse_function(true, false)?;
                Ok(Expression::Function(self.alloc(FunctionExpr {
                    data: self.node(NodeType::FunctionExpr, start),
                    func,
                })))
            }
            TokenKind::Class => {
                let class = self.parse_class(false, false)?;
                Ok(Expression::Class(self.alloc(ClassExpr {
                    data: self.node(NodeType::ClassExpr, start),
                    class,
                })))
            }
            // `#x in obj`
            TokenKind::PrivateName if self.peek2_kind() == TokenKind::In => {
                let token = self.bump();
                Ok(Expression::PrivateName(self.private_name(&token)))
            }
            TokenKind::Lt => self.parse_lt_operand(),
            _ if self.at_identifier() => Ok(Expression::Ident(self.parse_identifier()?)),
            _ => Err(self.unexpected()),
        }
    }

    /// `<` where an operand is expected.
    fn parse_lt_operand(&mut self) -> PResult<Expression<'a>> {
        if self.is_jsx() {
            return Ok(Expression::Jsx(self.parse_jsx_root()?));
        }
        if self.is_ts() {
            return Err(self.unexpected());
        }
        Err(self.feature_disabled("JSX syntax", "jsx"))
    }

    fn parse_paren_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::LParen)?;
        let expr = self.with_context(Context::empty(), Context::NO_IN, |p| p.parse_expression())?;
        self.expect(TokenKind::RParen)?;
        Ok(Expression::Paren(self.alloc(ParenExpr {
            data: self.node(NodeType::ParenExpr, start),
            expr,
        })))
    }

    /// A template literal, from the back-quote to the closing back-quote.
    /// Invalid escapes are an error unless the template is tagged, in which
    /// case the affected span has no cooked value.
    pub(crate) fn parse_template(&mut self, tagged: bool) -> PResult<&'a TemplateLit<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::TemplateStart)?;
        let mut quasis = self.new_vec();
        let mut exprs = self.new_vec();
        loop {
            let quasi = self.with_mode(LexMode::Template, |p| p.parse_template_element(tagged))?;
            let tail = quasi.tail;
            quasis.push(quasi);
            if tail {
                break;
            }
            let expr = self.with_context(Context::empty(), Context::NO_IN, |p| p.parse_expression())?;
            exprs.push(expr);
            self.expect(TokenKind::RBrace)?;
        }
        Ok(self.alloc(TemplateLit {
            data: self.node(NodeType::TemplateLit, start),
            quasis: quasis.into_bump_slice(),
            exprs: exprs.into_bump_slice(),
        }))
    }

    fn parse_template_element(&mut self, tagged: bool) -> PResult<TemplateElement<'a>> {
        if !self.at(TokenKind::TemplateSpan) {
            return Err(self.unexpected());
        }
        let token = self.bump();
        let Some(value) = token.template() else {
            return Err(ParseError::new(ErrorCode::UnterminatedTemplate, token.range, &[]));
        };
        if let Some(err) = &value.illegal_escape {
            if !tagged {
                return Err(err.clone().into());
            }
        }
        let raw = self.cow_str(&value.raw);
        let cooked = match &value.cooked {
            Some(_) if value.plain => Some(raw),
            Some(cooked) => Some(self.alloc_str(cooked)),
            None => None,
        };
        // The span token includes its terminator: the back-quote or `${`.
        let terminator = if value.tail { 1 } else { 2 };
        let range = TextRange::new(token.range.lo, token.range.hi - terminator);
        Ok(TemplateElement {
            data: NodeData::new(NodeType::TemplateElement, range),
            cooked,
            raw,
            tail: value.tail,
        })
    }

    fn parse_array_literal(&mut self) -> PResult<Expression<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::LBracket)?;
        let elements = self.with_context(Context::empty(), Context::NO_IN, |p| {
            let mut elements = p.new_vec();
            while !p.at(TokenKind::RBracket) {
                if p.eat(TokenKind::Comma) {
                    elements.push(None);
                    continue;
                }
                elements.push(Some(p.parse_expr_or_spread(true)?));
                if !p.at(TokenKind::RBracket) {
                    p.expect(TokenKind::Comma)?;
                }
            }
            Ok(elements.into_bump_slice())
        })?;
        self.expect(TokenKind::RBracket)?;
        Ok(Expression::Array(self.alloc(ArrayExpr {
            data: self.node(NodeType::ArrayExpr, start),
            elements,
        })))
    }

    fn parse_object_literal(&mut self) -> PResult<Expression<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::LBrace)?;
        let props = self.with_context(Context::empty(), Context::NO_IN, |p| {
            let mut props = p.new_vec();
            while !p.at(TokenKind::RBrace) {
                props.push(p.parse_object_member()?);
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            Ok(props.into_bump_slice())
        })?;
        self.expect(TokenKind::RBrace)?;
        Ok(Expression::Object(self.alloc(ObjectExpr {
            data: self.node(NodeType::ObjectExpr, start),
            props,
        })))
    }

    fn parse_object_member(&mut self) -> PResult<ObjectMember<'a>> {
        let start = self.peek_start();
        if self.eat(TokenKind::Ellipsis) {
            let arg = self.parse_assignment_expression_covered()?;
            return Ok(ObjectMember::Spread(self.alloc(SpreadElement {
                data: self.node(NodeType::SpreadElement, start),
                arg,
            })));
        }

        let mut is_async = false;
        let mut kind = PropKind::Init;
        if self.at(TokenKind::Async) {
            let (next, line_break) = self.peek2();
            if !line_break && (can_start_property_key(next) || next == TokenKind::Star) {
                self.bump();
                is_async = true;
            }
        }
        let is_generator = self.eat(TokenKind::Star);
        if !is_async && !is_generator && matches!(self.peek_kind(), TokenKind::Get | TokenKind::Set) {
            if can_start_property_key(self.peek2_kind()) {
                kind = if self.bump().kind == TokenKind::Get { PropKind::Get } else { PropKind::Set };
            }
        }

        let key_kind = self.peek_kind();
        let key = self.parse_property_key(false)?;

        let is_method = is_async
            || is_generator
            || kind != PropKind::Init
            || self.at(TokenKind::LParen)
            || (self.is_ts() && self.at(TokenKind::Lt));
        if is_method {
            let value_start = self.peek_start();
            let func = self.parse_function_rest(None, is_async, is_generator, false, false)?;
            let value = Expression::Function(self.alloc(FunctionExpr {
                data: self.node(NodeType::FunctionExpr, value_start),
                func,
            }));
            return Ok(self.property(start, key, value, kind, kind == PropKind::Init, false));
        }

        if self.eat(TokenKind::Colon) {
            let value = self.parse_assignment_expression_covered()?;
            return Ok(self.property(start, key, value, PropKind::Init, false, false));
        }

        // Shorthand `{ a }` or, as a destructuring target, `{ a = 1 }`.
        let id = match key {
            PropKey::Ident(id) if key_kind.is_identifier_like() && !self.is_reserved_in_context(key_kind) => id,
            _ => return Err(self.unexpected()),
        };
        let value = if self.at(TokenKind::Eq) {
            let eq = self.bump();
            let right = self.parse_assignment_expression()?;
            self.cover_init.get_or_insert(eq.range);
            Expression::Assign(self.alloc(AssignExpr {
                data: self.node(NodeType::AssignExpr, start),
                op: AssignOp::Assign,
                left: Pattern::Ident(id),
                right,
            }))
        } else {
            Expression::Ident(id)
        };
        Ok(self.property(start, key, value, PropKind::Init, false, true))
    }

    fn property(
        &self,
        start: u32,
        key: PropKey<'a>,
        value: Expression<'a>,
        kind: PropKind,
        method: bool,
        shorthand: bool,
    ) -> ObjectMember<'a> {
        ObjectMember::Prop(self.alloc(Property {
            data: self.node(NodeType::Property, start),
            key,
            value,
            kind,
            method,
            shorthand,
        }))
    }

    /// `yield` inside generators and `await` inside async functions are not
    /// identifiers.
    pub(crate) fn is_reserved_in_context(&self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::Yield => self.has_ctx(Context::YIELD),
            TokenKind::Await => self.has_ctx(Context::AWAIT),
            _ => false,
        }
    }

    /// A property name: identifier name, string, number, computed `[expr]`
    /// and, in classes, `#private`.
    pub(crate) fn parse_property_key(&mut self, allow_private: bool) -> PResult<PropKey<'a>> {
        match self.peek_kind() {
            TokenKind::String => Ok(PropKey::Str(self.parse_string_lit()?)),
            TokenKind::Num => Ok(PropKey::Num(self.parse_num_lit()?)),
            TokenKind::BigInt => Ok(PropKey::BigInt(self.parse_bigint_lit()?)),
            TokenKind::PrivateName if allow_private => {
                let token = self.bump();
                Ok(PropKey::Private(self.private_name(&token)))
            }
            TokenKind::LBracket => {
                self.bump();
                let expr = self.with_context(Context::empty(), Context::NO_IN, |p| p.parse_assignment_expression())?;
                self.expect(TokenKind::RBracket)?;
                Ok(PropKey::Computed(expr))
            }
            kind if kind.is_identifier_name() => Ok(PropKey::Ident(self.parse_identifier_name()?)),
            _ => Err(self.unexpected()),
        }
    }

    // ========================================================================
    // Patterns
    // ========================================================================

    /// The left side of `=`: a simple target, or an object or array literal
    /// reinterpreted as a destructuring pattern.
    pub(crate) fn to_assign_target(&self, expr: Expression<'a>) -> PResult<Pattern<'a>> {
        match expr {
            Expression::Object(_) | Expression::Array(_) => self.to_pattern(expr),
            _ => self.to_simple_target(expr),
        }
    }

    pub(crate) fn to_simple_target(&self, expr: Expression<'a>) -> PResult<Pattern<'a>> {
        if !is_simple_assign_target(expr) {
            return Err(ParseError::new(ErrorCode::InvalidAssignmentTarget, expr.range(), &[]));
        }
        Ok(match expr {
            Expression::Ident(id) => Pattern::Ident(id),
            other => Pattern::Expr(other),
        })
    }

    fn to_pattern(&self, expr: Expression<'a>) -> PResult<Pattern<'a>> {
        let invalid = |range: TextRange| ParseError::new(ErrorCode::InvalidAssignmentTarget, range, &[]);
        match expr {
            Expression::Ident(id) => Ok(Pattern::Ident(id)),
            Expression::Assign(assign) if assign.op == AssignOp::Assign => {
                Ok(Pattern::Assign(self.alloc(AssignPat {
                    data: NodeData::new(NodeType::AssignPat, assign.data.range),
                    left: assign.left,
                    right: assign.right,
                })))
            }
            Expression::Array(array) => {
                let mut elements = self.new_vec();
                for (index, element) in array.elements.iter().enumerate() {
                    let pattern = match element {
                        None => None,
                        Some(ExprOrSpread::Expr(expr)) => Some(self.to_pattern(*expr)?),
                        Some(ExprOrSpread::Spread(spread)) => {
                            if index + 1 != array.elements.len() {
                                return Err(invalid(spread.data.range));
                            }
                            Some(self.rest(spread)?)
                        }
                    };
                    elements.push(pattern);
                }
                Ok(Pattern::Array(self.alloc(ArrayPat {
                    data: NodeData::new(NodeType::ArrayPat, array.data.range),
                    elements: elements.into_bump_slice(),
                    typ: None,
                })))
            }
            Expression::Object(object) => {
                let mut props = self.new_vec();
                for (index, member) in object.props.iter().enumerate() {
                    let prop = match member {
                        ObjectMember::Prop(prop) => {
                            if prop.method || prop.kind != PropKind::Init {
                                return Err(invalid(prop.data.range));
                            }
                            ObjectPatProp::Prop(self.alloc(PatProperty {
                                data: NodeData::new(NodeType::PatProperty, prop.data.range),
                                key: prop.key,
                                value: self.to_pattern(prop.value)?,
                                shorthand: prop.shorthand,
                            }))
                        }
                        ObjectMember::Spread(spread) => {
                            if index + 1 != object.props.len() {
                                return Err(invalid(spread.data.range));
                            }
                            match self.rest(spread)? {
                                Pattern::Rest(rest) => ObjectPatProp::Rest(rest),
                                _ => return Err(invalid(spread.data.range)),
                            }
                        }
                    };
                    props.push(prop);
                }
                Ok(Pattern::Object(self.alloc(ObjectPat {
                    data: NodeData::new(NodeType::ObjectPat, object.data.range),
                    props: props.into_bump_slice(),
                    typ: None,
                })))
            }
            _ if is_simple_assign_target(expr) => Ok(Pattern::Expr(expr)),
            _ => Err(invalid(expr.range())),
        }
    }

    fn rest(&self, spread: &'a SpreadElement<'a>) -> PResult<Pattern<'a>> {
        let arg = self.to_pattern(spread.arg)?;
        Ok(Pattern::Rest(self.alloc(RestElement {
            data: NodeData::new(NodeType::RestElement, spread.data.range),
            arg,
        })))
    }

    /// A binding: identifier, `{...}` or `[...]`.
    pub(crate) fn parse_binding_pattern(&mut self) -> PResult<Pattern<'a>> {
        match self.peek_kind() {
            TokenKind::LBracket => self.parse_array_binding(),
            TokenKind::LBrace => self.parse_object_binding(),
            _ => Ok(Pattern::Ident(self.parse_identifier()?)),
        }
    }

    /// A binding with an optional default value.
    pub(crate) fn parse_binding_element(&mut self) -> PResult<Pattern<'a>> {
        let start = self.peek_start();
        let pattern = self.parse_binding_pattern()?;
        self.parse_binding_default(start, pattern)
    }

    pub(crate) fn parse_binding_default(&mut self, start: u32, pattern: Pattern<'a>) -> PResult<Pattern<'a>> {
        if !self.eat(TokenKind::Eq) {
            return Ok(pattern);
        }
        let right = self.with_context(Context::empty(), Context::NO_IN, |p| p.parse_assignment_expression())?;
        Ok(Pattern::Assign(self.alloc(AssignPat {
            data: self.node(NodeType::AssignPat, start),
            left: pattern,
            right,
        })))
    }

    fn parse_binding_rest(&mut self) -> PResult<&'a RestElement<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::Ellipsis)?;
        let arg = self.parse_binding_pattern()?;
        Ok(self.alloc(RestElement {
            data: self.node(NodeType::RestElement, start),
            arg,
        }))
    }

    fn parse_array_binding(&mut self) -> PResult<Pattern<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::LBracket)?;
        let mut elements = self.new_vec();
        while !self.at(TokenKind::RBracket) {
            if self.eat(TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            if self.at(TokenKind::Ellipsis) {
                let rest = self.parse_binding_rest()?;
                elements.push(Some(Pattern::Rest(rest)));
                break;
            }
            elements.push(Some(self.parse_binding_element()?));
            if !self.at(TokenKind::RBracket) {
                self.expect(TokenKind::Comma)?;
            }
        }
        self.expect(TokenKind::RBracket)?;
        Ok(Pattern::Array(self.alloc(ArrayPat {
            data: self.node(NodeType::ArrayPat, start),
            elements: elements.into_bump_slice(),
            typ: None,
        })))
    }

    fn parse_object_binding(&mut self) -> PResult<Pattern<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::LBrace)?;
        let mut props = self.new_vec();
        while !self.at(TokenKind::RBrace) {
            if self.at(TokenKind::Ellipsis) {
                let rest = self.parse_binding_rest()?;
                props.push(ObjectPatProp::Rest(rest));
                break;
            }
            let prop_start = self.peek_start();
            let key_kind = self.peek_kind();
            let key = self.parse_property_key(false)?;
            let (value, shorthand) = if self.eat(TokenKind::Colon) {
                (self.parse_binding_element()?, false)
            } else {
                let id = match key {
                    PropKey::Ident(id) if key_kind.is_identifier_like() && !self.is_reserved_in_context(key_kind) => id,
                    _ => return Err(self.unexpected()),
                };
                (self.parse_binding_default(prop_start, Pattern::Ident(id))?, true)
            };
            props.push(ObjectPatProp::Prop(self.alloc(PatProperty {
                data: self.node(NodeType::PatProperty, prop_start),
                key,
                value,
                shorthand,
            })));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Pattern::Object(self.alloc(ObjectPat {
            data: self.node(NodeType::ObjectPat, start),
            props: props.into_bump_slice(),
            typ: None,
        })))
    }

    /// Re-allocate a binding with its TypeScript annotation, extending its
    /// range over the annotation.
    pub(crate) fn annotate(&self, start: u32, pattern: Pattern<'a>, info: TypInfo<'a>) -> Pattern<'a> {
        let Some(typ) = self.typ(info) else {
            return pattern;
        };
        match pattern {
            Pattern::Ident(id) => Pattern::Ident(self.alloc(Identifier {
                data: self.node(NodeType::Identifier, start),
                name: id.name,
                typ: Some(typ),
            })),
            Pattern::Object(object) => Pattern::Object(self.alloc(ObjectPat {
                data: self.node(NodeType::ObjectPat, start),
                props: object.props,
                typ: Some(typ),
            })),
            Pattern::Array(array) => Pattern::Array(self.alloc(ArrayPat {
                data: self.node(NodeType::ArrayPat, start),
                elements: array.elements,
                typ: Some(typ),
            })),
            other => other,
        }
    }
}

/// `??` cannot be mixed with `||` or `&&` without parentheses.
fn check_nullish_mix(op: LogicalOp, op_range: TextRange, operand: Expression<'_>) -> PResult<()> {
    if let Expression::Logical(inner) = operand {
        let mixed = (op == LogicalOp::Nullish) != (inner.op == LogicalOp::Nullish);
        if mixed {
            return Err(ParseError::new(
                ErrorCode::NullishMixedWithLogical,
                op_range,
                &[inner.op.as_str(), op.as_str()],
            ));
        }
    }
    Ok(())
}

/// Report a failure after a rejected type argument list as the ambiguity it
/// is.
fn ambiguous_lt(lt: Option<TextRange>, err: ParseError) -> ParseError {
    match lt {
        Some(range) => ParseError::new(ErrorCode::AmbiguousGenericsFallbackFailure, range, &[]),
        None => err,
    }
}
