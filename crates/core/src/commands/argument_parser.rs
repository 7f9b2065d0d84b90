use crate::commands::value::Value;
use crate::registry;

pub type ArgumentParseResult<'a> = Result<(Value, &'a str), ()>;

fn skip_whitespace(input: &str) -> &str {
    input.trim_start()
}

pub fn consume_token(input: &str) -> Option<(&str, &str)> {
    let input = skip_whitespace(input);
    if input.is_empty() {
        return None;
    }

    let end = input.find(char::is_whitespace).unwrap_or(input.len());

    Some((&input[..end], &input[end..]))
}

pub fn parse_warp_name(input: &str) -> ArgumentParseResult<'_> {
    let (token, rest) = consume_token(input).ok_or(())?;
    let name = registry::validate_name(token).map_err(|_| ())?;

    Ok((Value::WarpName(name), rest))
}

pub fn parse_greedy_string(input: &str) -> ArgumentParseResult<'_> {
    let input = skip_whitespace(input);
    Ok((Value::GreedyString(input.trim_end().to_string()), ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens() {
        assert_eq!(consume_token("  warp  spawn"), Some(("warp", "  spawn")));
        assert_eq!(consume_token("spawn"), Some(("spawn", "")));
        assert_eq!(consume_token("   "), None);
    }

    #[test]
    fn warp_names_are_normalized() {
        let (value, rest) = parse_warp_name(" Nether_Hub extra").unwrap();
        assert!(matches!(value, Value::WarpName(ref name) if name == "nether_hub"));
        assert_eq!(rest, " extra");
    }

    #[test]
    fn bad_warp_names_do_not_parse() {
        assert!(parse_warp_name("").is_err());
        assert!(parse_warp_name("my.warp").is_err());
        assert!(parse_warp_name("§spawn").is_err());
    }

    #[test]
    fn greedy_takes_the_rest() {
        let (value, rest) = parse_greedy_string("  renamewarp  a b ").unwrap();
        assert!(matches!(value, Value::GreedyString(ref s) if s == "renamewarp  a b"));
        assert_eq!(rest, "");
    }
}
