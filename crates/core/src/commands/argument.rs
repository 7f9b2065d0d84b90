use super::argument_parser::*;

#[derive(Clone)]
pub enum ArgumentType {
    /// One word naming a warp, normalized
    WarpName,
    /// Everything up to the end of the line, possibly empty
    GreedyString,
}

impl ArgumentType {
    pub(super) fn parse<'a>(&self, input: &'a str) -> ArgumentParseResult<'a> {
        match self {
            ArgumentType::WarpName => parse_warp_name(input),
            ArgumentType::GreedyString => parse_greedy_string(input),
        }
    }

    pub(super) fn is_greedy(&self) -> bool {
        matches!(self, ArgumentType::GreedyString)
    }

    pub fn warp_name() -> Self {
        ArgumentType::WarpName
    }

    pub fn greedy_string() -> Self {
        ArgumentType::GreedyString
    }
}
