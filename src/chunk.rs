//! Cutting long text into request-sized pieces for the web services, which
//! only accept a limited number of characters per call. Translation batches
//! keep the line structure ([split_lines]); speech pieces don't need it
//! ([split_text]).

/// Split `text` into pieces of at most `max_chars` characters.
///
/// Text that already fits is returned untouched as a single piece. Otherwise
/// pieces end at sentence boundaries where possible, then at spaces, and a
/// single word longer than `max_chars` is cut mid-word. Whitespace between the
/// words of a piece is collapsed to one space.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if char_len(text) <= max_chars {
        return vec![text.to_string()];
    }

    let mut packer = Packer::new(max_chars);
    for sentence in sentences(text) {
        if char_len(sentence.trim()) <= max_chars {
            packer.push(sentence);
            continue;
        }
        for word in sentence.split_whitespace() {
            if char_len(word) <= max_chars {
                packer.push(word);
            } else {
                let chars: Vec<char> = word.chars().collect();
                for cut in chars.chunks(max_chars) {
                    packer.push(&cut.iter().collect::<String>());
                }
            }
        }
    }
    packer.finish()
}

/// A piece of text cut out of a longer one, with the separator that stood
/// between it and the next piece
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub text: String,
    /// `"\n"` between lines, `" "` inside a line that had to be cut, empty
    /// after the last batch
    pub separator: &'static str,
}

/// Split `text` into batches of at most `max_chars` characters without
/// touching its line structure.
///
/// Batches end at line breaks and keep every newline, blank lines included.
/// Only a single line longer than `max_chars` is cut further, at sentence or
/// word boundaries like [split_text]. Appending each batch's text and
/// separator in order gives back the input, apart from whitespace inside
/// such overlong lines.
pub fn split_lines(text: &str, max_chars: usize) -> Vec<Batch> {
    let max_chars = max_chars.max(1);
    if text.trim().is_empty() {
        return Vec::new();
    }
    if char_len(text) <= max_chars {
        return vec![Batch {
            text: text.to_string(),
            separator: "",
        }];
    }

    let mut units: Vec<(String, &'static str)> = Vec::new();
    for line in text.split('\n') {
        if char_len(line) <= max_chars {
            units.push((line.to_string(), "\n"));
            continue;
        }
        let pieces = split_text(line, max_chars);
        if pieces.is_empty() {
            units.push((String::new(), "\n"));
            continue;
        }
        units.extend(pieces.into_iter().map(|piece| (piece, " ")));
        if let Some(last) = units.last_mut() {
            last.1 = "\n";
        }
    }
    if let Some(last) = units.last_mut() {
        last.1 = "";
    }

    let mut batches = Vec::new();
    let mut current: Option<(String, usize)> = None;
    let mut pending = "";
    for (unit, separator) in units {
        let len = char_len(&unit);
        current = match current.take() {
            Some((text, used)) if used + pending.len() + len > max_chars => {
                batches.push(Batch {
                    text,
                    separator: pending,
                });
                Some((unit, len))
            }
            Some((mut text, used)) => {
                text.push_str(pending);
                text.push_str(&unit);
                Some((text, used + pending.len() + len))
            }
            None => Some((unit, len)),
        };
        pending = separator;
    }
    if let Some((text, _)) = current {
        batches.push(Batch {
            text,
            separator: pending,
        });
    }
    batches
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | ';' | '\n') || is_wide_terminator(ch)
}

/// Terminators of scripts that don't put a space after a sentence
fn is_wide_terminator(ch: char) -> bool {
    matches!(ch, '。' | '！' | '？' | '；' | '।' | '۔')
}

/// Sentences including their terminator. A '.' only ends a sentence when
/// followed by whitespace, so "3.14" stays whole. Newlines always end one.
fn sentences(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if !is_terminator(ch) {
            continue;
        }
        let end = index + ch.len_utf8();
        let boundary = match chars.peek() {
            Some(&(_, next)) => ch == '\n' || next.is_whitespace() || is_wide_terminator(ch),
            None => true,
        };
        if boundary {
            found.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        found.push(&text[start..]);
    }
    found
}

/// Greedily joins parts with single spaces without going over the limit
struct Packer {
    max_chars: usize,
    pieces: Vec<String>,
    current: String,
    current_len: usize,
}

impl Packer {
    fn new(max_chars: usize) -> Packer {
        Packer {
            max_chars,
            pieces: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    fn push(&mut self, part: &str) {
        let part = part.split_whitespace().collect::<Vec<_>>().join(" ");
        if part.is_empty() {
            return;
        }
        let len = char_len(&part);
        if !self.current.is_empty() && self.current_len + 1 + len > self.max_chars {
            self.flush();
        }
        if !self.current.is_empty() {
            self.current.push(' ');
            self.current_len += 1;
        }
        self.current.push_str(&part);
        self.current_len += len;
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.pieces.push(std::mem::take(&mut self.current));
            self.current_len = 0;
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn short_text_is_kept_as_is() {
        assert_eq!(split_text("  Line one.\nLine two.  ", 100), vec!["Line one.\nLine two."]);
        assert!(split_text(" \n ", 100).is_empty());
    }

    #[test]
    fn prefers_sentence_boundaries() {
        let pieces = split_text("First sentence here. Second one! Third?", 25);
        assert_eq!(pieces, vec!["First sentence here.", "Second one! Third?"]);
    }

    #[test]
    fn decimals_are_not_sentence_ends() {
        assert_eq!(sentences("Pi is 3.14. Done"), vec!["Pi is 3.14.", " Done"]);
    }

    #[test]
    fn wide_terminators_split_without_spaces() {
        assert_eq!(sentences("你好。再见！"), vec!["你好。", "再见！"]);
        assert_eq!(sentences("नमस्ते। धन्यवाद"), vec!["नमस्ते।", " धन्यवाद"]);
    }

    #[test]
    fn pieces_never_exceed_the_limit_and_keep_every_word() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        for max in [10, 37, 100, 500] {
            let pieces = split_text(&text, max);
            assert!(pieces.len() > 1);
            for piece in &pieces {
                assert!(piece.chars().count() <= max, "{piece:?} longer than {max}");
            }
            assert_eq!(words(&pieces.join(" ")), words(&text));
        }
    }

    fn rejoin(batches: &[Batch]) -> String {
        batches
            .iter()
            .flat_map(|batch| [batch.text.as_str(), batch.separator])
            .collect()
    }

    #[test]
    fn line_batches_keep_blank_lines() {
        let text = "First paragraph sentence.\n\nSecond paragraph sentence.\n".repeat(200);
        let batches = split_lines(&text, 5000);
        assert!(batches.len() > 1);
        for batch in &batches {
            assert!(batch.text.chars().count() <= 5000);
            assert_eq!(batch.separator, if batch == batches.last().unwrap() { "" } else { "\n" });
        }
        let rejoined = rejoin(&batches);
        assert_eq!(rejoined, text);
        assert_eq!(rejoined.matches("\n\n").count(), 200);
    }

    #[test]
    fn short_text_is_one_untrimmed_batch() {
        let batches = split_lines("\n\nTitle\n\nBody\n", 100);
        assert_eq!(
            batches,
            vec![Batch {
                text: "\n\nTitle\n\nBody\n".into(),
                separator: ""
            }]
        );
        assert!(split_lines(" \n\t", 100).is_empty());
    }

    #[test]
    fn only_overlong_lines_are_cut_inside() {
        let text = "short line\nThis one sentence. Goes well past the limit.\nend";
        let batches = split_lines(text, 20);
        assert_eq!(
            batches,
            vec![
                Batch { text: "short line".into(), separator: "\n" },
                Batch { text: "This one sentence.".into(), separator: " " },
                Batch { text: "Goes well past the".into(), separator: " " },
                Batch { text: "limit.\nend".into(), separator: "" },
            ]
        );
        assert_eq!(rejoin(&batches), text);
    }

    #[test]
    fn overlong_words_are_cut() {
        let word = "x".repeat(25);
        let pieces = split_text(&format!("tiny {word}"), 10);
        assert_eq!(pieces, vec!["tiny", "xxxxxxxxxx", "xxxxxxxxxx", "xxxxx"]);
    }
}
