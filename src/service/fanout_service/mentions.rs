/// Characters ending a mention besides whitespace
const TERMINATORS: [char; 6] = [',', '.', '!', '?', '"', ')'];

fn is_boundary(c: char) -> bool {
    c.is_whitespace() || TERMINATORS.contains(&c)
}

///
/// Collects usernames mentioned with `@name` tokens.
///
/// Mention must start at the beginning of the content or right after
/// whitespace or a terminator, so e-mail addresses are not mentions.
/// Names are returned in order of first occurrence without duplicates.
/// They are not validated.
///
pub fn collect_mentions(content: &str) -> Vec<String> {
    let mut mentions = Vec::<String>::new();
    let mut chars = content.chars().peekable();
    let mut at_boundary = true;

    while let Some(c) = chars.next() {
        if c != '@' || !at_boundary {
            at_boundary = is_boundary(c);
            continue;
        }

        while chars.next_if_eq(&'@').is_some() {}

        let mut name = String::new();
        while let Some(c) = chars.next_if(|c| !is_boundary(*c)) {
            name.push(c);
        }

        if !name.is_empty() && !mentions.contains(&name) {
            mentions.push(name);
        }

        // Name stopped at boundary or at the end of content
        at_boundary = true;
    }

    mentions
}
