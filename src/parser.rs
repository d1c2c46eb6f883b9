use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_until, take_while1},
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{map, map_res, opt, recognize},
    sequence::{delimited, preceded, tuple},
    IResult,
};

#[derive(Debug, PartialEq, Clone)]
pub enum Command {
    Range { limit: usize, offset: usize },
    Search { query: String },
    Update { id: u64, rating: i64 },
    Count,
    Health,
    Help,
    Exit,
}

const TOP_DEFAULT_LIMIT: usize = 10;
const PAGE_DEFAULT_LIMIT: usize = 100;

// --- BASIC PARSERS ---

fn parse_usize(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

fn parse_u64(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |s: &str| s.parse::<u64>())(input)
}

fn parse_i64(input: &str) -> IResult<&str, i64> {
    map_res(recognize(tuple((opt(char('-')), digit1))), |s: &str| {
        s.parse::<i64>()
    })(input)
}

fn parse_quoted_string(input: &str) -> IResult<&str, String> {
    let (input, _) = char('"')(input)?;
    let (input, content) = take_until("\"")(input)?;
    let (input, _) = char('"')(input)?;
    Ok((input, content.to_string()))
}

fn parse_bare_word(input: &str) -> IResult<&str, String> {
    map(take_while1(|c: char| !c.is_whitespace()), |s: &str| {
        s.to_string()
    })(input)
}

// --- HELPERS ---

fn ws<'a, F, O, E: nom::error::ParseError<&'a str>>(
    inner: F,
) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: FnMut(&'a str) -> IResult<&'a str, O, E>,
{
    delimited(multispace0, inner, multispace0)
}

fn tag_ci(t: &'static str) -> impl FnMut(&str) -> IResult<&str, &str> {
    move |input| tag_no_case(t)(input)
}

// --- COMMAND PARSERS ---

fn parse_top(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_ci("TOP")(input)?;
    let (input, limit) = opt(preceded(multispace1, parse_usize))(input)?;
    Ok((
        input,
        Command::Range {
            limit: limit.unwrap_or(TOP_DEFAULT_LIMIT),
            offset: 0,
        },
    ))
}

fn parse_page(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_ci("PAGE")(input)?;
    let (input, limit) = opt(preceded(ws(tag_ci("LIMIT")), parse_usize))(input)?;
    let (input, offset) = opt(preceded(ws(tag_ci("OFFSET")), parse_usize))(input)?;
    Ok((
        input,
        Command::Range {
            limit: limit.unwrap_or(PAGE_DEFAULT_LIMIT),
            offset: offset.unwrap_or(0),
        },
    ))
}

fn parse_search(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_ci("SEARCH")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, query) = alt((parse_quoted_string, parse_bare_word))(input)?;
    Ok((input, Command::Search { query }))
}

fn parse_update(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_ci("UPDATE")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, id) = parse_u64(input)?;
    // Long form "UPDATE 42 SET RATING 3000"; the SET RATING words are optional.
    let (input, _) = opt(tuple((ws(tag_ci("SET")), ws(tag_ci("RATING")))))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, rating) = parse_i64(input)?;
    Ok((input, Command::Update { id, rating }))
}

fn parse_count(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_ci("COUNT")(input)?;
    Ok((input, Command::Count))
}

fn parse_health(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_ci("HEALTH")(input)?;
    Ok((input, Command::Health))
}

fn parse_help(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_ci("HELP")(input)?;
    Ok((input, Command::Help))
}

fn parse_exit(input: &str) -> IResult<&str, Command> {
    let (input, _) = alt((tag_ci("EXIT"), tag_ci("QUIT")))(input)?;
    Ok((input, Command::Exit))
}

pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim();
    let result = alt((
        parse_top,
        parse_page,
        parse_search,
        parse_update,
        parse_count,
        parse_health,
        parse_help,
        parse_exit,
    ))(input);

    match result {
        Ok((remainder, cmd)) => {
            if !remainder.trim().is_empty() {
                return Err(format!("Unexpected tokens at end: '{}'", remainder));
            }
            Ok(cmd)
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            // e.input contains the slice where parsing failed
            let context = if e.input.len() > 20 {
                format!("{}...", &e.input[..20])
            } else {
                e.input.to_string()
            };
            Err(format!("Invalid syntax near: '{}'", context))
        }
        Err(nom::Err::Incomplete(_)) => Err("Incomplete command.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_defaults_to_ten() {
        assert_eq!(
            parse_command("TOP").unwrap(),
            Command::Range { limit: 10, offset: 0 }
        );
        assert_eq!(
            parse_command("top 25").unwrap(),
            Command::Range { limit: 25, offset: 0 }
        );
    }

    #[test]
    fn page_accepts_limit_and_offset() {
        assert_eq!(
            parse_command("PAGE LIMIT 20 OFFSET 40").unwrap(),
            Command::Range { limit: 20, offset: 40 }
        );
        assert_eq!(
            parse_command("PAGE").unwrap(),
            Command::Range { limit: 100, offset: 0 }
        );
        assert_eq!(
            parse_command("page offset 5").unwrap(),
            Command::Range { limit: 100, offset: 5 }
        );
    }

    #[test]
    fn search_takes_quoted_or_bare_query() {
        assert_eq!(
            parse_command("SEARCH \"rahul kumar\"").unwrap(),
            Command::Search { query: "rahul kumar".to_string() }
        );
        assert_eq!(
            parse_command("search priya").unwrap(),
            Command::Search { query: "priya".to_string() }
        );
        // Empty quoted query is legal: it matches every user.
        assert_eq!(
            parse_command("SEARCH \"\"").unwrap(),
            Command::Search { query: String::new() }
        );
    }

    #[test]
    fn update_long_and_short_forms() {
        assert_eq!(
            parse_command("UPDATE 42 SET RATING 3000").unwrap(),
            Command::Update { id: 42, rating: 3000 }
        );
        assert_eq!(
            parse_command("update 7 2500").unwrap(),
            Command::Update { id: 7, rating: 2500 }
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(parse_command("count").unwrap(), Command::Count);
        assert_eq!(parse_command("HEALTH").unwrap(), Command::Health);
        assert_eq!(parse_command("Help").unwrap(), Command::Help);
        assert_eq!(parse_command("quit").unwrap(), Command::Exit);
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(parse_command("COUNT me in").is_err());
        assert!(parse_command("TOP 5 please").is_err());
    }

    #[test]
    fn nonsense_reports_syntax_error() {
        let err = parse_command("FROBNICATE 9").unwrap_err();
        assert!(err.contains("Invalid syntax"));
    }
}
