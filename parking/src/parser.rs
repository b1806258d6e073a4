use crate::command::{Arguments, Command, Verb};
use crate::error::ParseError;
use crate::models::Vehicle;
use crate::types::MAX_LOT_SIZE;
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_till1, take_while},
    character::complete::digit1,
    combinator::{all_consuming, map_res, value},
    multi::many0,
    sequence::{preceded, terminated},
    IResult,
};
use std::str::FromStr;
use tracing::debug;

fn nom_whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

fn nom_token(input: &str) -> IResult<&str, &str> {
    preceded(nom_whitespace, take_till1(char::is_whitespace))(input)
}

fn nom_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(terminated(many0(nom_token), nom_whitespace))(input)
}

fn nom_verb(input: &str) -> IResult<&str, Verb> {
    all_consuming(alt((
        value(Verb::Create, tag_no_case(Verb::Create.name())),
        value(Verb::Park, tag_no_case(Verb::Park.name())),
        value(Verb::Leave, tag_no_case(Verb::Leave.name())),
        value(Verb::Status, tag_no_case(Verb::Status.name())),
    )))(input)
}

fn nom_non_negative<T: FromStr>(input: &str) -> IResult<&str, T> {
    all_consuming(map_res(digit1, |digits: &str| digits.parse::<T>()))(input)
}

fn nom_flag(input: &str) -> IResult<&str, bool> {
    all_consuming(alt((value(true, tag_no_case("true")), value(false, tag_no_case("false")))))(input)
}

/// Turns one line of text into a command. Whitespace between, before and after the words is ignored, and the verb
/// is case-insensitive.
pub fn parse<'lot>(line: &str) -> Result<Command<'lot>, ParseError> {
    let tokens = match nom_tokens(line) {
        Ok((_, tokens)) => tokens,
        Err(_) if line.trim().is_empty() => return Err(ParseError::Empty),
        Err(_) => {
            return Err(ParseError::Unsupported {
                verb: line.trim().to_string(),
            })
        },
    };
    let Some((&first, args)) = tokens.split_first() else {
        return Err(ParseError::Empty);
    };
    let Ok((_, verb)) = nom_verb(first) else {
        return Err(ParseError::Unsupported {
            verb: first.to_string(),
        });
    };
    debug!("Command: {verb} Args: {args:?}");

    let arguments = match verb {
        Verb::Create => parse_create(args),
        Verb::Park => parse_park(args),
        Verb::Leave => parse_leave(args),
        Verb::Status => parse_status(args),
    }?;
    Ok(Command::new(arguments))
}

fn parse_create(args: &[&str]) -> Result<Arguments, ParseError> {
    match args {
        [size] => nom_non_negative::<usize>(size)
            .ok()
            .map(|(_, size)| size)
            .filter(|size| *size <= MAX_LOT_SIZE)
            .map(|size| Arguments::Create { size })
            .ok_or_else(|| bad_argument(Verb::Create, size)),
        [] => Err(bad_argument(Verb::Create, "size")),
        [_, extra, ..] => Err(bad_argument(Verb::Create, extra)),
    }
}

fn parse_park(args: &[&str]) -> Result<Arguments, ParseError> {
    match args {
        [registration] => Ok(Arguments::Park {
            vehicle: Vehicle::new(*registration),
        }),
        [] => Err(bad_argument(Verb::Park, "registration no")),
        [_, extra, ..] => Err(bad_argument(Verb::Park, extra)),
    }
}

fn parse_leave(args: &[&str]) -> Result<Arguments, ParseError> {
    match args {
        [registration] => Ok(Arguments::Leave {
            vehicle: Vehicle::new(*registration),
            duration: None,
        }),
        [registration, duration] => nom_non_negative(duration)
            .map(|(_, duration)| Arguments::Leave {
                vehicle: Vehicle::new(*registration),
                duration: Some(duration),
            })
            .map_err(|_| bad_argument(Verb::Leave, duration)),
        [] => Err(bad_argument(Verb::Leave, "registration no")),
        [_, _, extra, ..] => Err(bad_argument(Verb::Leave, extra)),
    }
}

fn parse_status(args: &[&str]) -> Result<Arguments, ParseError> {
    match args {
        [] => Ok(Arguments::Status {
            include_empty_slots: false,
        }),
        [flag] => nom_flag(flag)
            .map(|(_, include_empty_slots)| Arguments::Status { include_empty_slots })
            .map_err(|_| bad_argument(Verb::Status, flag)),
        [_, extra, ..] => Err(bad_argument(Verb::Status, extra)),
    }
}

fn bad_argument(verb: Verb, argument: &str) -> ParseError {
    ParseError::BadArgument {
        argument: argument.to_string(),
        verb,
        usage: usage(verb),
    }
}

/// Syntax, description and an example for `verb`.
pub fn usage(verb: Verb) -> String {
    let lines: &[&str] = match verb {
        Verb::Create => &[
            "create_parking_lot {size}",
            "\tcreates a parking lot",
            "\twhere 'size' is the number of slots, a non-negative integer no larger than 2147483647",
            "\tfor e.g. create_parking_lot 10",
        ],
        Verb::Park => &[
            "park {registrationNo}",
            "\tparks the car in the nearest available slot",
            "\twhere 'registrationNo' is the registration number of the car, like MH-12-AB-9876",
            "\tfor e.g. park KA-01-HH-1234",
        ],
        Verb::Leave => &[
            "leave {registrationNo} [duration]",
            "\tremoves the car from the parking lot and charges for the time it was parked",
            "\twhere 'registrationNo' is the registration number of the car, like MH-12-AB-9876",
            "\twhere 'duration' is how long the car was parked, a non-negative integer in the lot's time unit;",
            "\tthe time since the car was parked is used when it is left out",
            "\tfor e.g. leave KA-01-HH-1234 4",
        ],
        Verb::Status => &[
            "status [includeEmptySlots]",
            "\tshows the slot and registration number of every parked car",
            "\twhere 'includeEmptySlots' is true or false (the default) and lists empty slots too",
            "\tfor e.g. status",
        ],
    };
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arguments(line: &str) -> Arguments {
        parse(line).expect("Line should have parsed.").arguments().clone()
    }

    fn bad_argument_of(line: &str) -> (String, Verb) {
        match parse(line) {
            Err(ParseError::BadArgument { argument, verb, usage: help }) => {
                assert_eq!(usage(verb), help);
                (argument, verb)
            },
            other => panic!("Expected a bad argument for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_tokens() {
        assert_eq!(Ok(("", vec!["park", "A"])), nom_tokens("  park \t A  "));
        assert_eq!(Ok(("", vec![])), nom_tokens("   "));
    }

    #[test]
    fn test_unicode_whitespace() {
        assert_eq!(Ok(("", vec!["park", "A"])), nom_tokens("\u{b}park\u{c}A\u{a0}"));
        assert_eq!(
            Arguments::Park {
                vehicle: Vehicle::new("A")
            },
            arguments("park\u{b}A")
        );
        assert_eq!(
            Arguments::Park {
                vehicle: Vehicle::new("A")
            },
            arguments("park\u{a0}A")
        );
        assert_eq!(
            Arguments::Status {
                include_empty_slots: false
            },
            arguments("status\u{c}")
        );
        assert_eq!(Arguments::Create { size: 5 }, arguments("create_parking_lot\u{3000}5"));
        assert_eq!(Err(ParseError::Empty), parse("\u{a0}\u{3000}\u{b}").map(|command| command.arguments().clone()));
    }

    #[test]
    fn test_create() {
        assert_eq!(Arguments::Create { size: 6 }, arguments("create_parking_lot 6"));
        assert_eq!(Arguments::Create { size: 0 }, arguments("create_parking_lot 0"));
        assert_eq!(Verb::Create, parse("create_parking_lot 6").unwrap().verb());
    }

    #[test]
    fn test_verb_is_case_insensitive() {
        assert_eq!(Arguments::Create { size: 3 }, arguments("CREATE_Parking_Lot 3"));
        assert_eq!(
            Arguments::Status {
                include_empty_slots: false
            },
            arguments("STATUS")
        );
    }

    #[test]
    fn test_redundant_whitespace() {
        assert_eq!(
            Arguments::Leave {
                vehicle: Vehicle::new("MH-12-NE-9010"),
                duration: Some(5)
            },
            arguments("   leave   MH-12-NE-9010 \t  5   ")
        );
    }

    #[test]
    fn test_create_bad_arguments() {
        assert_eq!(("size".to_string(), Verb::Create), bad_argument_of("create_parking_lot"));
        assert_eq!(("garbage".to_string(), Verb::Create), bad_argument_of("create_parking_lot garbage"));
        assert_eq!(("-1".to_string(), Verb::Create), bad_argument_of("create_parking_lot -1"));
        assert_eq!(("7".to_string(), Verb::Create), bad_argument_of("create_parking_lot 6 7"));
    }

    #[test]
    fn test_create_size_limit() {
        assert_eq!(Arguments::Create { size: MAX_LOT_SIZE }, arguments("create_parking_lot 2147483647"));
        assert_eq!(("2147483648".to_string(), Verb::Create), bad_argument_of("create_parking_lot 2147483648"));
        assert_eq!(
            ("18446744073709551615".to_string(), Verb::Create),
            bad_argument_of("create_parking_lot 18446744073709551615")
        );
    }

    #[test]
    fn test_create_bad_argument_message() {
        let message = parse("create_parking_lot -1").unwrap_err().to_string();
        let mut lines = message.lines();
        assert_eq!(
            Some("'-1' - not a valid argument for the command: create_parking_lot"),
            lines.next()
        );
        assert_eq!(Some("Correct usage:"), lines.next());
        assert_eq!(Some("create_parking_lot {size}"), lines.next());
    }

    #[test]
    fn test_park() {
        assert_eq!(
            Arguments::Park {
                vehicle: Vehicle::new("MH-12-NE-9010")
            },
            arguments("park MH-12-NE-9010")
        );
        assert_eq!(("registration no".to_string(), Verb::Park), bad_argument_of("park"));
        assert_eq!(("White".to_string(), Verb::Park), bad_argument_of("park MH-12-NE-9010 White"));
    }

    #[test]
    fn test_leave() {
        assert_eq!(
            Arguments::Leave {
                vehicle: Vehicle::new("MH-12-NE-9010"),
                duration: Some(5)
            },
            arguments("leave MH-12-NE-9010 5")
        );
        assert_eq!(
            Arguments::Leave {
                vehicle: Vehicle::new("MH-12-N-910"),
                duration: None
            },
            arguments("leave MH-12-N-910")
        );
    }

    #[test]
    fn test_leave_bad_arguments() {
        assert_eq!(("registration no".to_string(), Verb::Leave), bad_argument_of("leave"));
        assert_eq!(("-5".to_string(), Verb::Leave), bad_argument_of("leave MH-12-NE-9010 -5"));
        assert_eq!(("five".to_string(), Verb::Leave), bad_argument_of("leave MH-12-NE-9010 five"));
        assert_eq!(("extra".to_string(), Verb::Leave), bad_argument_of("leave MH-12-NE-9010 5 extra"));
        // Larger than any duration can be.
        assert_eq!(
            ("99999999999999999999999".to_string(), Verb::Leave),
            bad_argument_of("leave MH-12-NE-9010 99999999999999999999999")
        );
    }

    #[test]
    fn test_status() {
        assert_eq!(
            Arguments::Status {
                include_empty_slots: false
            },
            arguments("status")
        );
        assert_eq!(
            Arguments::Status {
                include_empty_slots: true
            },
            arguments("status TRUE")
        );
        assert_eq!(
            Arguments::Status {
                include_empty_slots: false
            },
            arguments("status false")
        );
        assert_eq!(("maybe".to_string(), Verb::Status), bad_argument_of("status maybe"));
        assert_eq!(("false".to_string(), Verb::Status), bad_argument_of("status true false"));
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(
            Err(ParseError::Unsupported {
                verb: "current_status".to_string()
            }),
            parse("current_status").map(|command| command.arguments().clone())
        );
        // Verbs have to match a whole word.
        assert!(matches!(parse("parking A"), Err(ParseError::Unsupported { .. })));
        let message = parse("current_status").unwrap_err().to_string();
        assert!(message.starts_with("'current_status' is not a supported command!"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(Err(ParseError::Empty), parse("").map(|command| command.arguments().clone()));
        assert_eq!(Err(ParseError::Empty), parse(" \t ").map(|command| command.arguments().clone()));
    }

    #[test]
    fn test_usage() {
        for verb in Verb::ALL {
            let help = usage(verb);
            assert!(help.starts_with(verb.name()));
            assert!(help.lines().count() > 2);
            assert!(help.contains("for e.g."));
        }
    }
}
