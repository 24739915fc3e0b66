/// Diagnostic-dump configuration for the front end.
///
/// Every switch is a pure observability hook: turning one on echoes
/// intermediate state (tokens, AST, symbol tables) but never changes what
/// the pipeline accepts or rejects. The struct is passed explicitly into
/// the phases instead of living in process-wide mutable state.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Echo every token produced by the lexer.
    pub dump_tokens: bool,
    /// Pretty-print the AST after a successful parse.
    pub dump_ast: bool,
    /// Dump the class table once pass 1 has built it.
    pub dump_class_table: bool,
    /// Dump each method table right after it is built during pass 2.
    pub dump_method_table: bool,
}
