//! Statements, declarations, functions, classes and module items.

use bumpalo::collections::Vec as BumpVec;
use esfront_ast::node::*;
use esfront_ast::node_type::NodeType;
use esfront_ast::token_kind::TokenKind;
use esfront_ast::types::*;
use esfront_diagnostics::{ErrorCode, ParseError};

use crate::parser::{Context, Label, PResult, Parser};
use crate::utilities::{can_follow_modifier, can_start_property_key, strip_quotes};

/// Context cleared when entering a function body.
const FUNCTION_BOUNDARY: Context = Context::YIELD
    .union(Context::AWAIT)
    .union(Context::IN_ITERATION)
    .union(Context::IN_SWITCH)
    .union(Context::NO_IN);

impl<'a> Parser<'a> {
    // ========================================================================
    // Statement lists
    // ========================================================================

    /// The directive prologue: leading string-literal statements. A
    /// `"use strict"` directive turns on strict mode for the rest of the
    /// body, and for any legacy octal string already seen in the prologue.
    pub(crate) fn parse_directives(&mut self, body: &mut BumpVec<'a, Statement<'a>>) -> PResult<()> {
        let mut octal = None;
        while self.at(TokenKind::String) {
            let token = self.peek();
            let (range, is_octal) = (token.range, token.is_legacy_octal());
            let stmt = self.parse_statement()?;
            let directive = match stmt {
                Statement::Expr(expr_stmt) => match expr_stmt.expr {
                    Expression::Str(lit) if lit.data.range == range => Some((expr_stmt, lit)),
                    _ => None,
                },
                _ => None,
            };
            let Some((expr_stmt, lit)) = directive else {
                body.push(stmt);
                break;
            };

            let value = strip_quotes(lit.raw);
            if value == "use strict" {
                if let Some(octal) = octal {
                    return Err(ParseError::new(
                        ErrorCode::LegacyOctalInStrictMode,
                        octal,
                        &[&self.source[octal.lo as usize..octal.hi as usize]],
                    ));
                }
                self.ctx |= Context::STRICT;
            }
            if is_octal && octal.is_none() {
                octal = Some(range);
            }
            body.push(Statement::Directive(self.alloc(Directive {
                data: NodeData::new(NodeType::Directive, expr_stmt.data.range),
                value,
            })));
        }
        Ok(())
    }

    /// A top-level statement; import and export declarations are allowed in
    /// modules.
    pub(crate) fn parse_module_item(&mut self) -> PResult<Statement<'a>> {
        match self.peek_kind() {
            TokenKind::Import if !matches!(self.peek2_kind(), TokenKind::LParen | TokenKind::Dot) => {
                if !self.is_module() {
                    return Err(self.illegal_position("An 'import' declaration"));
                }
                self.parse_import_declaration()
            }
            TokenKind::Export => {
                if !self.is_module() {
                    return Err(self.illegal_position("An 'export' declaration"));
                }
                self.parse_export_declaration()
            }
            _ => self.parse_statement(),
        }
    }

    fn illegal_position(&mut self, what: &str) -> ParseError {
        ParseError::new(ErrorCode::IllegalStatementPosition, self.peek_range(), &[what])
    }

    pub(crate) fn parse_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        match self.peek_kind() {
            TokenKind::LBrace => Ok(Statement::Block(self.parse_block()?)),
            TokenKind::Semi => {
                let token = self.bump();
                Ok(Statement::Empty(self.alloc(EmptyStmt {
                    data: NodeData::new(NodeType::EmptyStmt, token.range),
                })))
            }
            TokenKind::Var => self.parse_var_statement(VarKind::Var),
            TokenKind::Let if self.at_let_declaration() => self.parse_var_statement(VarKind::Let),
            TokenKind::Const if self.is_ts() && self.peek2_kind() == TokenKind::Enum => {
                self.bump();
                self.parse_enum_declaration(start, true)
            }
            TokenKind::Const => self.parse_var_statement(VarKind::Const),
            TokenKind::Function => self.parse_function_declaration(start, false),
            TokenKind::Async if self.peek2() == (TokenKind::Function, false) => {
                self.bump();
                self.parse_function_declaration(start, true)
            }
            TokenKind::Class => self.parse_class_declaration(start, false),
            TokenKind::Abstract if self.is_ts() && self.peek2() == (TokenKind::Class, false) => {
                self.bump();
                self.parse_class_declaration(start, true)
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => self.parse_break_continue(true),
            TokenKind::Continue => self.parse_break_continue(false),
            TokenKind::Throw => self.parse_throw_statement(),
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::With => self.parse_with_statement(),
            TokenKind::Debugger => {
                self.bump();
                self.semicolon()?;
                Ok(Statement::Debugger(self.alloc(DebuggerStmt {
                    data: self.node(NodeType::DebuggerStmt, start),
                })))
            }
            TokenKind::Import if !matches!(self.peek2_kind(), TokenKind::LParen | TokenKind::Dot) => {
                Err(self.illegal_position("An 'import' declaration"))
            }
            TokenKind::Export => Err(self.illegal_position("An 'export' declaration")),
            TokenKind::Type if self.at_ts_declaration_name() => {
                if !self.is_ts() {
                    return Err(self.feature_disabled("Type aliases", "typescript"));
                }
                self.parse_type_alias_declaration(start)
            }
            TokenKind::Interface if self.at_ts_declaration_name() => {
                if !self.is_ts() {
                    return Err(self.feature_disabled("Interfaces", "typescript"));
                }
                let decl = self.parse_interface_declaration(start)?;
                Ok(Statement::TsInterface(decl))
            }
            TokenKind::Enum => {
                if !self.is_ts() {
                    return Err(self.feature_disabled("Enums", "typescript"));
                }
                self.parse_enum_declaration(start, false)
            }
            kind if kind.is_identifier_like() && self.at_identifier() && self.peek2_kind() == TokenKind::Colon => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `let` starts a declaration when a binding follows it.
    fn at_let_declaration(&mut self) -> bool {
        let next = self.peek2_kind();
        next.is_identifier_like() || matches!(next, TokenKind::LBracket | TokenKind::LBrace)
    }

    /// `type X` and `interface X`, with the name on the same line.
    fn at_ts_declaration_name(&mut self) -> bool {
        let (next, line_break) = self.peek2();
        !line_break && next.is_identifier_like()
    }

    pub(crate) fn parse_block(&mut self) -> PResult<&'a BlockStmt<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::LBrace)?;
        let mut body = self.new_vec();
        while !self.at(TokenKind::RBrace) {
            body.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(self.alloc(BlockStmt {
            data: self.node(NodeType::BlockStmt, start),
            body: body.into_bump_slice(),
        }))
    }

    /// A function body with its own directive prologue. Labels of the
    /// enclosing function are not visible inside. A `"use strict"` body
    /// requires a simple parameter list.
    pub(crate) fn parse_function_body(&mut self, params: &[Param<'a>]) -> PResult<&'a BlockStmt<'a>> {
        let labels = std::mem::take(&mut self.labels);
        let result = self.parse_function_body_inner();
        self.labels = labels;
        let body = result?;
        let simple = params.iter().all(|param| matches!(param.pat, Pattern::Ident(_)));
        if !simple {
            let use_strict = body.body.iter().find_map(|stmt| match stmt {
                Statement::Directive(directive) if directive.value == "use strict" => Some(directive),
                _ => None,
            });
            if let Some(directive) = use_strict {
                return Err(ParseError::new(
                    ErrorCode::IllegalStatementPosition,
                    directive.data.range,
                    &["A 'use strict' directive after a non-simple parameter list"],
                ));
            }
        }
        Ok(body)
    }

    fn parse_function_body_inner(&mut self) -> PResult<&'a BlockStmt<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::LBrace)?;
        let mut body = self.new_vec();
        self.parse_directives(&mut body)?;
        while !self.at(TokenKind::RBrace) {
            body.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(self.alloc(BlockStmt {
            data: self.node(NodeType::BlockStmt, start),
            body: body.into_bump_slice(),
        }))
    }

    fn parse_expression_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        let expr = self.parse_expression()?;
        self.semicolon()?;
        Ok(Statement::Expr(self.alloc(ExprStmt {
            data: self.node(NodeType::ExprStmt, start),
            expr,
        })))
    }

    // ========================================================================
    // Variable declarations
    // ========================================================================

    fn parse_var_statement(&mut self, kind: VarKind) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        self.bump();
        let decls = self.parse_var_declarators(kind, false)?;
        self.semicolon()?;
        Ok(Statement::Var(self.alloc(VarDecl {
            data: self.node(NodeType::VarDecl, start),
            kind,
            decls,
        })))
    }

    /// The declarators after `var`/`let`/`const`. Inside a `for` head the
    /// initializers are checked by the caller, since `for (const x of y)`
    /// has none.
    fn parse_var_declarators(&mut self, kind: VarKind, in_for: bool) -> PResult<&'a [VarDeclarator<'a>]> {
        let mut decls = self.new_vec();
        loop {
            let start = self.peek_start();
            let pattern = self.parse_binding_pattern()?;
            let allow_definite = matches!(pattern, Pattern::Ident(_));
            let info = self.parse_binding_type_info(false, allow_definite)?;
            let name = self.annotate(start, pattern, info);
            let init = if self.eat(TokenKind::Eq) {
                Some(self.parse_assignment_expression()?)
            } else {
                None
            };
            let decl = VarDeclarator {
                data: self.node(NodeType::VarDeclarator, start),
                name,
                init,
            };
            if !in_for {
                self.check_declarator_init(kind, &decl)?;
            }
            decls.push(decl);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(decls.into_bump_slice())
    }

    /// `const` and destructuring declarators need an initializer.
    fn check_declarator_init(&mut self, kind: VarKind, decl: &VarDeclarator<'a>) -> PResult<()> {
        if decl.init.is_some() {
            return Ok(());
        }
        if kind == VarKind::Const || !matches!(decl.name, Pattern::Ident(_)) {
            return Err(self.unexpected());
        }
        Ok(())
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn parse_paren_test(&mut self) -> PResult<Expression<'a>> {
        self.expect(TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        Ok(test)
    }

    fn parse_if_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::If)?;
        let test = self.parse_paren_test()?;
        let cons = self.parse_statement()?;
        let alt = if self.eat(TokenKind::Else) {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(Statement::If(self.alloc(IfStmt {
            data: self.node(NodeType::IfStmt, start),
            test,
            cons,
            alt,
        })))
    }

    fn parse_loop_body(&mut self) -> PResult<Statement<'a>> {
        self.with_context(Context::IN_ITERATION, Context::empty(), |p| p.parse_statement())
    }

    fn parse_while_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::While)?;
        let test = self.parse_paren_test()?;
        let body = self.parse_loop_body()?;
        Ok(Statement::While(self.alloc(WhileStmt {
            data: self.node(NodeType::WhileStmt, start),
            test,
            body,
        })))
    }

    fn parse_do_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::Do)?;
        let body = self.parse_loop_body()?;
        self.expect(TokenKind::While)?;
        let test = self.parse_paren_test()?;
        // The semicolon after `do ... while (x)` is always optional.
        self.eat(TokenKind::Semi);
        Ok(Statement::DoWhile(self.alloc(DoWhileStmt {
            data: self.node(NodeType::DoWhileStmt, start),
            body,
            test,
        })))
    }

    /// `for (;;)`, `for (x in y)`, `for (x of y)` and `for await (x of y)`.
    fn parse_for_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::For)?;
        let is_await = self.at(TokenKind::Await) && self.has_ctx(Context::AWAIT);
        if is_await {
            self.bump();
        }
        self.expect(TokenKind::LParen)?;

        let mut init = None;
        let mut head = None;
        let var_kind = match self.peek_kind() {
            TokenKind::Var => Some(VarKind::Var),
            TokenKind::Const => Some(VarKind::Const),
            TokenKind::Let if self.at_let_declaration() => Some(VarKind::Let),
            _ => None,
        };
        if let Some(kind) = var_kind {
            let decl_start = self.peek_start();
            self.bump();
            let decls =
                self.with_context(Context::NO_IN, Context::empty(), |p| p.parse_var_declarators(kind, true))?;
            let decl = self.alloc(VarDecl {
                data: self.node(NodeType::VarDecl, decl_start),
                kind,
                decls,
            });
            let single = decls.len() == 1 && decls[0].init.is_none();
            if single && matches!(self.peek_kind(), TokenKind::In | TokenKind::Of) {
                head = Some(ForHead::Var(decl));
            } else {
                for declarator in decls {
                    self.check_declarator_init(kind, declarator)?;
                }
                init = Some(ForInit::Var(decl));
            }
        } else if !self.at(TokenKind::Semi) {
            let outer = self.cover_init.take();
            let expr = self.with_context(Context::NO_IN, Context::empty(), |p| p.parse_expression_covered())?;
            if matches!(self.peek_kind(), TokenKind::In | TokenKind::Of) {
                head = Some(ForHead::Pattern(self.to_assign_target(expr)?));
            } else if let Some(range) = self.cover_init {
                return Err(ParseError::new(ErrorCode::UnexpectedToken, range, &["="]));
            } else {
                init = Some(ForInit::Expr(expr));
            }
            self.cover_init = outer;
        }

        if let Some(left) = head {
            let is_of = self.bump().kind == TokenKind::Of;
            if is_await && !is_of {
                return Err(self.unexpected());
            }
            let right = if is_of {
                self.parse_assignment_expression()?
            } else {
                self.parse_expression()?
            };
            self.expect(TokenKind::RParen)?;
            let body = self.parse_loop_body()?;
            return Ok(if is_of {
                Statement::ForOf(self.alloc(ForOfStmt {
                    data: self.node(NodeType::ForOfStmt, start),
                    left,
                    right,
                    body,
                    is_await,
                }))
            } else {
                Statement::ForIn(self.alloc(ForInStmt {
                    data: self.node(NodeType::ForInStmt, start),
                    left,
                    right,
                    body,
                }))
            });
        }

        if is_await {
            return Err(self.unexpected());
        }
        self.expect(TokenKind::Semi)?;
        let test = if self.at(TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semi)?;
        let update = if self.at(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RParen)?;
        let body = self.parse_loop_body()?;
        Ok(Statement::For(self.alloc(ForStmt {
            data: self.node(NodeType::ForStmt, start),
            init,
            test,
            update,
            body,
        })))
    }

    fn parse_return_statement(&mut self) -> PResult<Statement<'a>> {
        if !self.has_ctx(Context::IN_FUNCTION) {
            return Err(self.illegal_position("A 'return' statement"));
        }
        let start = self.peek_start();
        self.expect(TokenKind::Return)?;
        let arg = if self.can_insert_semicolon() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.semicolon()?;
        Ok(Statement::Return(self.alloc(ReturnStmt {
            data: self.node(NodeType::ReturnStmt, start),
            arg,
        })))
    }

    fn parse_throw_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        let token = self.expect(TokenKind::Throw)?;
        if self.has_line_break_before() {
            return Err(ParseError::new(
                ErrorCode::RestrictedProductionViolation,
                token.range,
                &["after 'throw'"],
            ));
        }
        let arg = self.parse_expression()?;
        self.semicolon()?;
        Ok(Statement::Throw(self.alloc(ThrowStmt {
            data: self.node(NodeType::ThrowStmt, start),
            arg,
        })))
    }

    /// `break` and `continue`. A label must be on the same line and name an
    /// enclosing labeled statement.
    fn parse_break_continue(&mut self, is_break: bool) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        let what = if is_break { "A 'break' statement" } else { "A 'continue' statement" };
        let keyword = self.bump();
        let label = if !self.can_insert_semicolon() && self.at_identifier() {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        if let Some(label) = label {
            match self.labels.iter().rev().find(|l| l.name == label.name) {
                None => {
                    return Err(ParseError::new(ErrorCode::UnexpectedToken, label.data.range, &[label.name]));
                }
                Some(target) if !is_break && !target.iteration => {
                    return Err(ParseError::new(
                        ErrorCode::IllegalStatementPosition,
                        label.data.range,
                        &["A 'continue' to a label that is not on a loop"],
                    ));
                }
                Some(_) => {}
            }
        }
        let allowed = if is_break && label.is_some() {
            true
        } else if is_break {
            self.has_ctx(Context::IN_ITERATION | Context::IN_SWITCH)
        } else {
            self.has_ctx(Context::IN_ITERATION)
        };
        if !allowed {
            return Err(ParseError::new(ErrorCode::IllegalStatementPosition, keyword.range, &[what]));
        }
        self.semicolon()?;
        let data = self.node(if is_break { NodeType::BreakStmt } else { NodeType::ContinueStmt }, start);
        Ok(if is_break {
            Statement::Break(self.alloc(BreakStmt { data, label }))
        } else {
            Statement::Continue(self.alloc(ContinueStmt { data, label }))
        })
    }

    fn parse_labeled_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        let label = self.parse_identifier()?;
        self.expect(TokenKind::Colon)?;
        let iteration = self.at_labeled_loop();
        self.labels.push(Label {
            name: label.name,
            iteration,
        });
        let body = self.parse_statement();
        self.labels.pop();
        let body = body?;
        Ok(Statement::Labeled(self.alloc(LabeledStmt {
            data: self.node(NodeType::LabeledStmt, start),
            label,
            body,
        })))
    }

    /// Whether the upcoming statement, after any further labels, is a loop.
    fn at_labeled_loop(&mut self) -> bool {
        self.look_ahead(|p| {
            while p.at_identifier() && p.peek2_kind() == TokenKind::Colon {
                p.bump();
                p.bump();
            }
            matches!(p.peek_kind(), TokenKind::For | TokenKind::While | TokenKind::Do)
        })
    }

    fn parse_try_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::Try)?;
        let block = self.parse_block()?;

        let handler = if self.at(TokenKind::Catch) {
            let catch_start = self.peek_start();
            self.bump();
            let param = if self.eat(TokenKind::LParen) {
                let param_start = self.peek_start();
                let pattern = self.parse_binding_pattern()?;
                let info = self.parse_binding_type_info(false, false)?;
                let param = self.annotate(param_start, pattern, info);
                self.expect(TokenKind::RParen)?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(self.alloc(CatchClause {
                data: self.node(NodeType::CatchClause, catch_start),
                param,
                body,
            }))
        } else {
            None
        };
        let finalizer = if self.eat(TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.unexpected());
        }
        Ok(Statement::Try(self.alloc(TryStmt {
            data: self.node(NodeType::TryStmt, start),
            block,
            handler,
            finalizer,
        })))
    }

    fn parse_switch_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::Switch)?;
        let discriminant = self.parse_paren_test()?;
        self.expect(TokenKind::LBrace)?;
        let cases = self.with_context(Context::IN_SWITCH, Context::empty(), |p| {
            let mut cases = p.new_vec();
            let mut seen_default = false;
            while !p.at(TokenKind::RBrace) {
                let case_start = p.peek_start();
                let test = if p.eat(TokenKind::Case) {
                    Some(p.parse_expression()?)
                } else {
                    let token = p.expect(TokenKind::Default)?;
                    if seen_default {
                        return Err(ParseError::new(ErrorCode::UnexpectedToken, token.range, &["default"]));
                    }
                    seen_default = true;
                    None
                };
                p.expect(TokenKind::Colon)?;
                let mut cons = p.new_vec();
                while !matches!(p.peek_kind(), TokenKind::Case | TokenKind::Default | TokenKind::RBrace) {
                    cons.push(p.parse_statement()?);
                }
                cases.push(SwitchCase {
                    data: p.node(NodeType::SwitchCase, case_start),
                    test,
                    cons: cons.into_bump_slice(),
                });
            }
            Ok(cases.into_bump_slice())
        })?;
        self.expect(TokenKind::RBrace)?;
        Ok(Statement::Switch(self.alloc(SwitchStmt {
            data: self.node(NodeType::SwitchStmt, start),
            discriminant,
            cases,
        })))
    }

    fn parse_with_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        let token = self.expect(TokenKind::With)?;
        if self.is_strict() {
            return Err(ParseError::new(ErrorCode::StrictModeViolation, token.range, &["'with' statement"]));
        }
        let object = self.parse_paren_test()?;
        let body = self.parse_statement()?;
        Ok(Statement::With(self.alloc(WithStmt {
            data: self.node(NodeType::WithStmt, start),
            object,
            body,
        })))
    }

    // ========================================================================
    // Functions
    // ========================================================================

    fn parse_function_declaration(&mut self, start: u32, is_async: bool) -> PResult<Statement<'a>> {
        let func = self.parse_function(is_async, true)?;
        Ok(Statement::Function(self.alloc(FunctionDecl {
            data: self.node(NodeType::FunctionDecl, start),
            func,
        })))
    }

    /// `function* name(params) { body }`, from the `function` keyword. A
    /// declaration needs a name and, in TypeScript, may be a bodiless
    /// overload signature.
    pub(crate) fn parse_function(&mut self, is_async: bool, is_declaration: bool) -> PResult<Function<'a>> {
        self.parse_function_named(is_async, is_declaration, is_declaration)
    }

    fn parse_function_named(&mut self, is_async: bool, name_required: bool, is_declaration: bool) -> PResult<Function<'a>> {
        self.expect(TokenKind::Function)?;
        let is_generator = self.eat(TokenKind::Star);
        let id = if self.at_identifier() {
            Some(self.parse_identifier()?)
        } else if name_required {
            return Err(self.unexpected());
        } else {
            None
        };
        let allow_no_body = is_declaration && self.is_ts();
        self.parse_function_rest(id, is_async, is_generator, false, allow_no_body)
    }

    /// Type parameters, parameters, return type and body. Shared by
    /// function declarations and expressions, object methods and class
    /// methods.
    pub(crate) fn parse_function_rest(
        &mut self,
        id: Option<&'a Identifier<'a>>,
        is_async: bool,
        is_generator: bool,
        param_properties: bool,
        allow_no_body: bool,
    ) -> PResult<Function<'a>> {
        let mut add = Context::IN_FUNCTION;
        if is_generator {
            add |= Context::YIELD;
        }
        if is_async {
            add |= Context::AWAIT;
        }
        self.with_context(add, FUNCTION_BOUNDARY, |p| {
            let type_params = if p.is_ts() && p.at(TokenKind::Lt) {
                Some(p.parse_type_params()?)
            } else {
                None
            };
            let params = p.parse_formal_params(param_properties)?;
            let annotation = p.parse_return_type_annotation()?;
            let body = if p.at(TokenKind::LBrace) {
                Some(p.parse_function_body(params)?)
            } else if allow_no_body {
                p.semicolon()?;
                None
            } else {
                return Err(p.unexpected());
            };
            let typ = p.typ(TypInfo {
                type_params,
                annotation,
                ..TypInfo::default()
            });
            Ok(Function {
                id,
                params,
                body,
                is_async,
                is_generator,
                typ,
            })
        })
    }

    /// `(a, b = 1, ...rest)`. With `param_properties`, TypeScript
    /// accessibility and `readonly` modifiers are accepted (constructors).
    pub(crate) fn parse_formal_params(&mut self, param_properties: bool) -> PResult<&'a [Param<'a>]> {
        self.expect(TokenKind::LParen)?;
        let mut params = self.new_vec();
        while !self.at(TokenKind::RParen) {
            let start = self.peek_start();
            let modifiers = if param_properties && self.is_ts() {
                self.parse_param_modifiers()
            } else {
                ModifierFlags::NONE
            };

            let is_rest = self.eat(TokenKind::Ellipsis);
            let pattern_start = self.peek_start();
            let pattern = if self.is_ts() && self.at(TokenKind::This) {
                let token = self.bump();
                Pattern::Ident(self.ident_from_token(&token))
            } else {
                self.parse_binding_pattern()?
            };
            let info = self.parse_binding_type_info(!is_rest, false)?;
            let pattern = self.annotate(pattern_start, pattern, info);
            let pat = if is_rest {
                Pattern::Rest(self.alloc(RestElement {
                    data: self.node(NodeType::RestElement, start),
                    arg: pattern,
                }))
            } else {
                self.parse_binding_default(pattern_start, pattern)?
            };
            params.push(Param {
                data: self.node(NodeType::Param, start),
                pat,
                modifiers,
            });
            if is_rest || !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(params.into_bump_slice())
    }

    fn parse_param_modifiers(&mut self) -> ModifierFlags {
        let mut modifiers = ModifierFlags::NONE;
        while let Some(flag) = ModifierFlags::from_token(self.peek_kind()) {
            if !ModifierFlags::PARAMETER_PROPERTY_MODIFIER.contains(flag) {
                break;
            }
            let next = self.peek2_kind();
            if !(next.is_identifier_like() || matches!(next, TokenKind::LBrace | TokenKind::LBracket)) {
                break;
            }
            self.bump();
            modifiers |= flag;
        }
        modifiers
    }

    // ========================================================================
    // Classes
    // ========================================================================

    fn parse_class_declaration(&mut self, start: u32, is_abstract: bool) -> PResult<Statement<'a>> {
        let class = self.parse_class(true, is_abstract)?;
        Ok(Statement::Class(self.alloc(ClassDecl {
            data: self.node(NodeType::ClassDecl, start),
            class,
        })))
    }

    /// A class, from the `class` keyword. All parts of a class are strict
    /// mode code.
    pub(crate) fn parse_class(&mut self, require_name: bool, is_abstract: bool) -> PResult<Class<'a>> {
        self.expect(TokenKind::Class)?;
        self.with_context(Context::STRICT, Context::empty(), |p| {
            let id = if p.at_identifier() && !(p.is_ts() && p.at(TokenKind::Implements)) {
                Some(p.parse_identifier()?)
            } else if require_name {
                return Err(p.unexpected());
            } else {
                None
            };
            let type_params = if p.is_ts() && p.at(TokenKind::Lt) {
                Some(p.parse_type_params()?)
            } else {
                None
            };

            let mut super_class = None;
            let mut type_args = None;
            if p.eat(TokenKind::Extends) {
                super_class = Some(p.parse_left_hand_side_expression()?);
                if p.is_ts() && p.at(TokenKind::Lt) {
                    type_args = Some(p.parse_type_args()?);
                }
            }
            let implements = if p.at(TokenKind::Implements) {
                if !p.is_ts() {
                    return Err(p.feature_disabled("'implements' clauses", "typescript"));
                }
                p.bump();
                p.parse_heritage_list()?
            } else {
                &[]
            };

            let body = p.parse_class_body()?;
            let typ = p.typ(TypInfo {
                type_params,
                type_args,
                ..TypInfo::default()
            });
            Ok(Class {
                id,
                super_class,
                implements,
                body,
                is_abstract,
                typ,
            })
        })
    }

    fn parse_class_body(&mut self) -> PResult<&'a [ClassMember<'a>]> {
        self.expect(TokenKind::LBrace)?;
        let mut members = self.new_vec();
        while !self.at(TokenKind::RBrace) {
            if self.eat(TokenKind::Semi) {
                continue;
            }
            members.push(self.parse_class_member()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(members.into_bump_slice())
    }

    fn parse_class_member(&mut self) -> PResult<ClassMember<'a>> {
        let start = self.peek_start();
        if self.at(TokenKind::Static) && self.peek2_kind() == TokenKind::LBrace {
            return self.parse_static_block();
        }

        let mut modifiers = ModifierFlags::NONE;
        while let Some(flag) = ModifierFlags::from_token(self.peek_kind()) {
            if flag != ModifierFlags::STATIC && !self.is_ts() {
                break;
            }
            if !can_follow_modifier(self.peek2_kind()) {
                break;
            }
            self.bump();
            modifiers |= flag;
        }

        let mut is_async = false;
        if self.at(TokenKind::Async) {
            let (next, line_break) = self.peek2();
            if !line_break && (can_start_property_key(next) || next == TokenKind::Star) {
                self.bump();
                is_async = true;
            }
        }
        let is_generator = self.eat(TokenKind::Star);
        let mut kind = MethodKind::Method;
        if !is_async && !is_generator && matches!(self.peek_kind(), TokenKind::Get | TokenKind::Set) {
            if can_start_property_key(self.peek2_kind()) {
                kind = if self.bump().kind == TokenKind::Get { MethodKind::Get } else { MethodKind::Set };
            }
        }

        let key = self.parse_property_key(true)?;
        let is_constructor = kind == MethodKind::Method
            && !modifiers.contains(ModifierFlags::STATIC)
            && matches!(key, PropKey::Ident(_) | PropKey::Str(_))
            && key.static_name() == Some("constructor");
        let optional = self.is_ts() && self.eat(TokenKind::Question);

        let is_method = self.at(TokenKind::LParen)
            || (self.is_ts() && self.at(TokenKind::Lt))
            || is_async
            || is_generator
            || kind != MethodKind::Method;
        if is_method {
            if is_constructor {
                kind = MethodKind::Constructor;
            }
            let allow_no_body = self.is_ts();
            let func = self.parse_function_rest(None, is_async, is_generator, is_constructor, allow_no_body)?;
            return Ok(ClassMember::Method(self.alloc(ClassMethod {
                data: self.node(NodeType::ClassMethod, start),
                key,
                kind,
                func,
                modifiers,
                optional,
            })));
        }

        let definite = self.is_ts() && !optional && self.eat(TokenKind::Bang);
        let annotation = if self.at(TokenKind::Colon) {
            if !self.is_ts() {
                return Err(self.feature_disabled("Type annotations", "typescript"));
            }
            self.bump();
            Some(self.parse_type()?)
        } else {
            None
        };
        let value = if self.eat(TokenKind::Eq) {
            let value = self.with_context(
                Context::empty(),
                Context::YIELD | Context::AWAIT | Context::NO_IN,
                |p| p.parse_assignment_expression(),
            )?;
            Some(value)
        } else {
            None
        };
        self.semicolon()?;
        let typ = self.typ(TypInfo {
            annotation,
            optional,
            definite,
            ..TypInfo::default()
        });
        Ok(ClassMember::Prop(self.alloc(ClassProp {
            data: self.node(NodeType::ClassProp, start),
            key,
            value,
            modifiers,
            typ,
        })))
    }

    /// `static { ... }`: a function-like boundary without `return`.
    fn parse_static_block(&mut self) -> PResult<ClassMember<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::Static)?;
        let labels = std::mem::take(&mut self.labels);
        let body = self.with_context(Context::empty(), FUNCTION_BOUNDARY | Context::IN_FUNCTION, |p| {
            let block = p.parse_block()?;
            Ok(block.body)
        });
        self.labels = labels;
        let body = body?;
        Ok(ClassMember::StaticBlock(self.alloc(StaticBlock {
            data: self.node(NodeType::StaticBlock, start),
            body,
        })))
    }

    // ========================================================================
    // Modules
    // ========================================================================

    /// `from` is an ordinary identifier spelled `from`.
    fn at_from(&mut self) -> bool {
        let token = self.peek();
        token.kind == TokenKind::Identifier && token.raw == "from"
    }

    fn parse_from_clause(&mut self) -> PResult<&'a StringLit<'a>> {
        if !self.at_from() {
            return Err(self.unexpected());
        }
        self.bump();
        self.parse_string_lit()
    }

    fn parse_module_export_name(&mut self) -> PResult<ModuleExportName<'a>> {
        if self.at(TokenKind::String) {
            return Ok(ModuleExportName::Str(self.parse_string_lit()?));
        }
        Ok(ModuleExportName::Ident(self.parse_identifier_name()?))
    }

    /// `import type` is a type-only import unless `type` is itself the
    /// default binding (`import type from "m"`).
    fn at_type_only_import(&mut self) -> bool {
        if !self.is_ts() || !self.at(TokenKind::Type) {
            return false;
        }
        self.look_ahead(|p| {
            p.bump();
            match p.peek_kind() {
                TokenKind::LBrace | TokenKind::Star => true,
                kind if kind.is_identifier_like() => {
                    let is_from = p.at_from();
                    p.bump();
                    !(is_from && p.at(TokenKind::String))
                }
                _ => false,
            }
        })
    }

    fn parse_import_declaration(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::Import)?;
        let type_only = self.at_type_only_import();
        if type_only {
            self.bump();
        }

        let mut specifiers = self.new_vec();
        if !self.at(TokenKind::String) {
            let mut named_clause = true;
            if self.at_identifier() {
                let local = self.parse_identifier()?;
                specifiers.push(ImportSpec::Default(self.alloc(ImportDefaultSpecifier {
                    data: NodeData::new(NodeType::ImportDefaultSpecifier, local.data.range),
                    local,
                })));
                named_clause = self.eat(TokenKind::Comma);
            }
            if named_clause {
                match self.peek_kind() {
                    TokenKind::Star => {
                        let spec_start = self.peek_start();
                        self.bump();
                        self.expect(TokenKind::As)?;
                        let local = self.parse_identifier()?;
                        specifiers.push(ImportSpec::Namespace(self.alloc(ImportNamespaceSpecifier {
                            data: self.node(NodeType::ImportNamespaceSpecifier, spec_start),
                            local,
                        })));
                    }
                    TokenKind::LBrace => self.parse_named_imports(&mut specifiers)?,
                    _ => return Err(self.unexpected()),
                }
            }
            if !self.at_from() {
                return Err(self.unexpected());
            }
        }

        let source = if self.at_from() {
            self.parse_from_clause()?
        } else {
            self.parse_string_lit()?
        };
        self.semicolon()?;
        Ok(Statement::Import(self.alloc(ImportDecl {
            data: self.node(NodeType::ImportDecl, start),
            specifiers: specifiers.into_bump_slice(),
            source,
            type_only,
        })))
    }

    fn parse_named_imports(&mut self, specifiers: &mut BumpVec<'a, ImportSpec<'a>>) -> PResult<()> {
        self.expect(TokenKind::LBrace)?;
        while !self.at(TokenKind::RBrace) {
            let spec_start = self.peek_start();
            let name_kind = self.peek_kind();
            let imported = self.parse_module_export_name()?;
            let local = if self.eat(TokenKind::As) {
                self.parse_identifier()?
            } else {
                match imported {
                    ModuleExportName::Ident(id) if name_kind.is_identifier_like() => id,
                    _ => {
                        return Err(ParseError::new(
                            ErrorCode::UnexpectedToken,
                            imported.range(),
                            &[imported.value()],
                        ))
                    }
                }
            };
            specifiers.push(ImportSpec::Named(self.alloc(ImportSpecifier {
                data: self.node(NodeType::ImportSpecifier, spec_start),
                imported,
                local,
            })));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(())
    }

    fn parse_export_declaration(&mut self) -> PResult<Statement<'a>> {
        let start = self.peek_start();
        self.expect(TokenKind::Export)?;
        match self.peek_kind() {
            TokenKind::Star => {
                self.bump();
                let exported = if self.eat(TokenKind::As) {
                    Some(self.parse_module_export_name()?)
                } else {
                    None
                };
                let source = self.parse_from_clause()?;
                self.semicolon()?;
                Ok(Statement::ExportAll(self.alloc(ExportAllDecl {
                    data: self.node(NodeType::ExportAllDecl, start),
                    exported,
                    source,
                })))
            }
            TokenKind::Default => {
                self.bump();
                let decl = self.parse_export_default_value()?;
                Ok(Statement::ExportDefault(self.alloc(ExportDefaultDecl {
                    data: self.node(NodeType::ExportDefaultDecl, start),
                    decl,
                })))
            }
            TokenKind::LBrace => self.parse_export_named(start),
            TokenKind::Var
            | TokenKind::Let
            | TokenKind::Const
            | TokenKind::Function
            | TokenKind::Async
            | TokenKind::Class
            | TokenKind::Abstract
            | TokenKind::Type
            | TokenKind::Interface
            | TokenKind::Enum => {
                let decl = self.parse_statement()?;
                if !decl.is_declaration() {
                    return Err(ParseError::new(ErrorCode::UnexpectedToken, decl.range(), &["export"]));
                }
                Ok(Statement::ExportNamed(self.alloc(ExportNamedDecl {
                    data: self.node(NodeType::ExportNamedDecl, start),
                    decl: Some(decl),
                    specifiers: &[],
                    source: None,
                })))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_export_default_value(&mut self) -> PResult<DefaultDecl<'a>> {
        let start = self.peek_start();
        match self.peek_kind() {
            TokenKind::Function => {
                let func = self.parse_function_named(false, false, true)?;
                Ok(DefaultDecl::Function(self.alloc(FunctionDecl {
                    data: self.node(NodeType::FunctionDecl, start),
                    func,
                })))
            }
            TokenKind::Async if self.peek2() == (TokenKind::Function, false) => {
                self.bump();
                let func = self.parse_function_named(true, false, true)?;
                Ok(DefaultDecl::Function(self.alloc(FunctionDecl {
                    data: self.node(NodeType::FunctionDecl, start),
                    func,
                })))
            }
            TokenKind::Class => {
                let class = self.parse_class(false, false)?;
                Ok(DefaultDecl::Class(self.alloc(ClassDecl {
                    data: self.node(NodeType::ClassDecl, start),
                    class,
                })))
            }
            TokenKind::Abstract if self.is_ts() && self.peek2() == (TokenKind::Class, false) => {
                self.bump();
                let class = self.parse_class(false, true)?;
                Ok(DefaultDecl::Class(self.alloc(ClassDecl {
                    data: self.node(NodeType::ClassDecl, start),
                    class,
                })))
            }
            TokenKind::Interface if self.is_ts() && self.at_ts_declaration_name() => {
                Ok(DefaultDecl::TsInterface(self.parse_interface_declaration(start)?))
            }
            _ => {
                let expr = self.parse_assignment_expression()?;
                self.semicolon()?;
                Ok(DefaultDecl::Expr(expr))
            }
        }
    }

    /// `export { a, b as c }` and `export { a } from "m"`. Without a source
    /// the local names must be identifiers.
    fn parse_export_named(&mut self, start: u32) -> PResult<Statement<'a>> {
        self.expect(TokenKind::LBrace)?;
        let mut specifiers = self.new_vec();
        while !self.at(TokenKind::RBrace) {
            let spec_start = self.peek_start();
            let local = self.parse_module_export_name()?;
            let exported = if self.eat(TokenKind::As) {
                Some(self.parse_module_export_name()?)
            } else {
                None
            };
            specifiers.push(ExportSpecifier {
                data: self.node(NodeType::ExportSpecifier, spec_start),
                local,
                exported,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        let source = if self.at_from() {
            Some(self.parse_from_clause()?)
        } else {
            None
        };
        if source.is_none() {
            if let Some(spec) = specifiers.iter().find(|spec| matches!(spec.local, ModuleExportName::Str(_))) {
                return Err(ParseError::new(
                    ErrorCode::UnexpectedToken,
                    spec.local.range(),
                    &[spec.local.value()],
                ));
            }
        }
        self.semicolon()?;
        Ok(Statement::ExportNamed(self.alloc(ExportNamedDecl {
            data: self.node(NodeType::ExportNamedDecl, start),
            decl: None,
            specifiers: specifiers.into_bump_slice(),
            source,
        })))
    }
}
