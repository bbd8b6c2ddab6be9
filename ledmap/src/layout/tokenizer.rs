#[derive(Clone, Copy)]
enum State {
    /// Commas end the current token.
    Normal,
    /// Inside the arguments of a keycode macro such as `LT(1,KC_A)`; commas
    /// belong to the token until the matching `)`.
    Parenthesized { depth: usize },
}

/// Splits one line of layout macro arguments into keycodes.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut state = State::Normal;
    let mut tokens = Vec::new();
    let mut token = String::new();

    for character in line.chars() {
        match state {
            State::Normal => match character {
                ',' => finalize_token(&mut tokens, &mut token),
                '(' => {
                    token.push(character);
                    state = State::Parenthesized { depth: 1 };
                }
                _ => token.push(character),
            },
            State::Parenthesized { depth } => {
                token.push(character);
                state = match character {
                    '(' => State::Parenthesized { depth: depth + 1 },
                    ')' if depth == 1 => State::Normal,
                    ')' => State::Parenthesized { depth: depth - 1 },
                    _ => state,
                };
            }
        }
    }
    finalize_token(&mut tokens, &mut token);

    tokens
}

fn finalize_token(tokens: &mut Vec<String>, token: &mut String) {
    let trimmed = token.trim();
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_owned());
    }
    token.clear();
}
