//! Splits a shell line into tokens: whitespace separated, single or double
//! quotes group words.

use crate::errors::{AppError, AppResult};

pub fn tokenize(line: &str) -> AppResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(AppError::InvalidCommand(format!("unterminated {q} quote")));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(tokenize("  set  name   Capex ").unwrap(), ["set", "name", "Capex"]);
    }

    #[test]
    fn quotes_group_words_and_allow_empty_tokens() {
        assert_eq!(
            tokenize(r#"wizard push faq "Is it online?" 'Yes, fully'"#).unwrap(),
            ["wizard", "push", "faq", "Is it online?", "Yes, fully"]
        );
        assert_eq!(tokenize(r#"set brand """#).unwrap(), ["set", "brand", ""]);
        assert_eq!(tokenize(r#"set name "it's""#).unwrap(), ["set", "name", "it's"]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(matches!(
            tokenize("set name \"Capex"),
            Err(AppError::InvalidCommand(_))
        ));
    }
}
