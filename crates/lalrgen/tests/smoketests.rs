use lalrgen::{
    generate,
    grammar::{examples, Assoc, Grammar, Precedence, ProductionID, SymbolID::*, TerminalID},
    lr0::StateID,
    table::Action,
    Generated,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Drive the generated table over a token string and record the sequence
/// of reductions. Panics on a cell with no action, which for the grammars
/// below means the table is wrong.
fn reductions(g: &Grammar, generated: &Generated, input: &[TerminalID]) -> Vec<ProductionID> {
    let mut stack = vec![StateID::INITIAL];
    let mut input = input.iter().copied().chain(Some(TerminalID::EOI)).peekable();
    let mut trace = Vec::new();
    loop {
        let state = *stack.last().unwrap();
        let row = &generated.table.states[&state];
        let lookahead = *input.peek().unwrap();
        match row.actions[&lookahead] {
            Action::Shift(next) => {
                input.next();
                stack.push(next);
            }
            Action::Reduce(p) => {
                let production = g.production(p);
                for _ in 0..production.right.len() {
                    stack.pop();
                }
                let top = *stack.last().unwrap();
                stack.push(generated.table.states[&top].gotos[&production.left]);
                trace.push(p);
            }
            Action::Accept => break,
        }
    }
    trace
}

#[test]
fn example_grammars_generate() {
    init_tracing();
    for f in [
        examples::arithmetic,
        examples::arithmetic_prec,
        examples::expr_prec,
        examples::with_nullable,
        examples::repeated,
        examples::reduce_reduce,
    ] {
        let g = Grammar::define(f).unwrap();
        let generated = generate(&g).unwrap();
        assert!(!generated.table.states.is_empty());

        // the displays must render without panicking.
        let _ = format!("{}", g);
        let _ = format!("{}", generated.automaton.display(&g));
        let _ = format!("{}", generated.table.display(&g));
        for conflict in &generated.conflicts {
            let _ = format!("{}", conflict.display(&g));
        }
    }
}

#[test]
fn generation_is_deterministic() {
    init_tracing();
    for f in [examples::arithmetic_prec, examples::with_nullable] {
        let g1 = Grammar::define(f).unwrap();
        let g2 = Grammar::define(f).unwrap();
        let a = generate(&g1).unwrap();
        let b = generate(&g2).unwrap();
        assert_eq!(a.automaton.states.len(), b.automaton.states.len());
        assert_eq!(
            a.automaton.display(&g1).to_string(),
            b.automaton.display(&g2).to_string()
        );
        assert_eq!(
            a.table.display(&g1).to_string(),
            b.table.display(&g2).to_string()
        );
    }
}

#[test]
fn precedence_shapes_the_parse() {
    // E -> E + E | E * E | id, with * binding tighter than +, both left.
    let mut captured = None;
    let g = Grammar::define(|g| {
        let plus = g.terminal("PLUS", Some(Precedence::new(0, Assoc::Left)))?;
        let star = g.terminal("STAR", Some(Precedence::new(1, Assoc::Left)))?;
        let ident = g.terminal("ID", None)?;
        let expr = g.nonterminal("expr")?;
        g.start_symbol(expr);
        let p_add = g.production(None, expr, [N(expr), T(plus), N(expr)])?;
        let p_mul = g.production(None, expr, [N(expr), T(star), N(expr)])?;
        let p_id = g.production(None, expr, [T(ident)])?;
        captured = Some((plus, star, ident, p_add, p_mul, p_id));
        Ok(())
    })
    .unwrap();
    let (plus, star, ident, p_add, p_mul, p_id) = captured.unwrap();

    let generated = generate(&g).unwrap();
    assert!(generated.conflicts.is_empty());

    // id + id * id: the multiplication reduces before the addition.
    let trace = reductions(&g, &generated, &[ident, plus, ident, star, ident]);
    assert_eq!(trace, vec![p_id, p_id, p_id, p_mul, p_add]);

    // id + id + id: left associativity reduces the first addition before
    // the third operand's shift completes the second.
    let trace = reductions(&g, &generated, &[ident, plus, ident, plus, ident]);
    assert_eq!(trace, vec![p_id, p_id, p_add, p_id, p_add]);
}

#[test]
fn unambiguous_grammar_has_no_conflicts() {
    let g = Grammar::define(examples::arithmetic).unwrap();
    let generated = generate(&g).unwrap();
    assert!(generated.conflicts.is_empty());
}

#[test]
fn reduce_reduce_reports_one_conflict() {
    let g = Grammar::define(examples::reduce_reduce).unwrap();
    let generated = generate(&g).unwrap();
    assert_eq!(generated.conflicts.len(), 1);
}

#[test]
fn validation_failure_aborts_generation() {
    let g = Grammar::define(|g| {
        let a = g.terminal("A", None)?;
        let s = g.nonterminal("s")?;
        g.start_symbol(s);
        g.production(None, s, [N(s), T(a)])?;
        Ok(())
    })
    .unwrap();
    assert!(generate(&g).is_err());
}
