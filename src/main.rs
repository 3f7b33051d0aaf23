use clap::{Parser, ValueEnum};
use env_logger::Env;
use group_parse::{
    error::IntervalError,
    group::{Element, MathGroup},
    groups::{complex::complex, real::real},
    interval::{points, ComplexInterval, Interval, RealInterval},
    lexer,
    parser::parse,
    sampler::evaluate_over_domain,
    token::TokenKind,
};
use miette::{miette, LabeledSpan, NamedSource, Report};

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Group {
    Real,
    Complex,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Input {
    /// The expression to evaluate, with tokens separated by whitespace
    expression: String,

    /// The number system to evaluate the expression in
    #[clap(long, value_enum, default_value_t = Group::Real)]
    group: Group,

    /// Name of the free variable in the expression
    #[clap(long, default_value = "x")]
    variable: String,

    /// First value of the variable, written as a literal of the chosen group
    #[clap(long, default_value = "0", allow_hyphen_values = true)]
    start: String,

    /// Last value of the variable. Defaults to the start value.
    #[clap(long, allow_hyphen_values = true)]
    end: Option<String>,

    /// Distance between two consecutive values of the variable
    #[clap(long, default_value_t = 1.0, allow_negative_numbers = true)]
    step: f64,

    /// Debug the lexer, printing out each token. Does not parse or evaluate the expression.
    #[clap(long, default_value = "false")]
    debug_lexer: bool,

    /// Debug the parser, printing out the postfix form. Does not evaluate the expression.
    #[clap(long, default_value = "false")]
    debug_parser: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let input = Input::parse();

    let result = match input.group {
        Group::Real => run(&input, real(), RealInterval::new),
        Group::Complex => run(&input, complex(), ComplexInterval::new),
    };

    if let Err(e) = result {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}

fn run<T, I, F>(input: &Input, group: &MathGroup<T>, new_interval: F) -> miette::Result<()>
where
    T: Element,
    I: Interval<Value = T>,
    F: FnOnce(T, f64, T) -> Result<I, IntervalError>,
{
    if input.debug_lexer {
        run_debug_lexer(&input.expression, group);
        return Ok(());
    }

    let expression = parse(&input.expression, &input.variable, group)
        .map_err(|e| Report::new(e).with_source_code(source_code(&input.expression)))?;

    if input.debug_parser {
        println!("{expression}");
        return Ok(());
    }

    let start = parse_bound(&input.start, group)?;
    let end = match &input.end {
        Some(end) => parse_bound(end, group)?,
        None => start.clone(),
    };
    let interval = new_interval(start, input.step, end)?;

    let (values, failure) = match evaluate_over_domain(&expression, &interval, group) {
        Ok(values) => (values, None),
        Err(mut e) => (std::mem::take(&mut e.partial), Some(e)),
    };

    for (point, value) in points(&interval).zip(values) {
        println!("{point}\t{value}");
    }

    match failure {
        Some(e) => Err(Report::new(e)),
        None => Ok(()),
    }
}

fn parse_bound<T: Element>(literal: &str, group: &MathGroup<T>) -> miette::Result<T> {
    group
        .parse_value(literal)
        .ok_or_else(|| miette!("'{literal}' is not a valid {} value", group.name()))
}

fn source_code(expression: &str) -> NamedSource<String> {
    lexer::Lexer::new(expression).get_source_code()
}

fn run_debug_lexer<T: Element>(expression: &str, group: &MathGroup<T>) {
    let lexer = lexer::Lexer::new(expression);
    let source_code = lexer.get_source_code();

    for token in lexer {
        let kind = match group.classify(token.text) {
            TokenKind::Operator(symbol) => format!("Operator({})", group.symbol(symbol)),
            TokenKind::Function(symbol) => format!("Function({})", group.symbol(symbol)),
            kind => format!("{:?}", kind),
        };
        let diag = miette!(
            labels = vec![LabeledSpan::at(token.span.start..token.span.end, kind)],
            severity = miette::Severity::Advice,
            "found a token",
        )
        .with_source_code(source_code.clone());
        eprintln!("{:?}", diag);
    }
}
