use crate::Token;
use tracing::warn;

const ID: usize = 0;
const FORM: usize = 1;
const LEMMA: usize = 2;
const UPOS: usize = 3;

/// Parses CoNLL-U formatted text, as emitted by UDPipe, into sentences of tokens.
///
/// Comment lines are skipped, as are multiword token ranges (`1-2`) and empty nodes (`1.1`).
/// A blank line ends a sentence. Lines with fewer than four columns are skipped with a warning.
///
/// # Arguments
/// * `text` - CoNLL-U content.
///
/// # Returns
/// * Vector of sentences, each a non-empty vector of tokens.
pub fn parse_conllu(text: &str) -> Vec<Vec<Token>> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if !current.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() <= UPOS {
            warn!("Skipping CoNLL-U line {} with {} columns", index + 1, columns.len());
            continue;
        }
        if columns[ID].contains('-') || columns[ID].contains('.') {
            continue;
        }

        let form = columns[FORM];
        let lemma = match columns[LEMMA] {
            "_" | "" => form,
            lemma => lemma,
        };
        let upos = match columns[UPOS] {
            "_" | "" => None,
            upos => Some(upos.to_string()),
        };

        current.push(Token {
            form: form.to_string(),
            lemma: lemma.to_string(),
            upos,
        });
    }

    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# newdoc\n\
# text = Měli jsme strach.\n\
1\tMěli\tmít\tVERB\t_\t_\t0\troot\t_\t_\n\
2\tjsme\tbýt\tAUX\t_\t_\t1\taux\t_\t_\n\
3\tstrach\tstrach\tNOUN\t_\t_\t1\tobj\t_\tSpaceAfter=No\n\
4\t.\t.\tPUNCT\t_\t_\t1\tpunct\t_\t_\n\
\n\
1-2\tabychom\t_\t_\t_\t_\t_\t_\t_\t_\n\
1\taby\taby\tSCONJ\t_\t_\t0\troot\t_\t_\n\
2\tbychom\tbýt\tAUX\t_\t_\t1\taux\t_\t_\n";

    #[test]
    fn it_should_parse_sentences() {
        let sentences = parse_conllu(SAMPLE);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].len(), 4);
        assert_eq!(sentences[0][0].lemma, "mít");
        assert_eq!(sentences[0][2].upos.as_deref(), Some("NOUN"));
    }

    #[test]
    fn it_should_skip_ranges_and_short_lines() {
        let sentences = parse_conllu(SAMPLE);
        let forms: Vec<&str> = sentences[1].iter().map(|t| t.form.as_str()).collect();
        assert_eq!(forms, vec!["aby", "bychom"]);

        assert!(parse_conllu("1\tonly\n\n").is_empty());
    }

    #[test]
    fn it_should_fall_back_to_form_for_missing_lemma() {
        let sentences = parse_conllu("1\tslovo\t_\t_\n");
        assert_eq!(sentences[0][0].lemma, "slovo");
        assert_eq!(sentences[0][0].upos, None);
    }
}
