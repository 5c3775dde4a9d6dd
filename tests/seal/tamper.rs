use rand::Rng;
use summary_seal::seal::{SummaryInput, seal, unseal};

const SECRET: &[u8] = b"s3cr3t";
const BASE64URL_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Replace the character at `index` with a different Base64URL character.
fn mutate_at(token: &str, index: usize, rng: &mut impl Rng) -> String {
    let mut bytes = token.as_bytes().to_vec();
    let original = bytes[index];
    loop {
        let candidate = BASE64URL_ALPHABET[rng.random_range(0..BASE64URL_ALPHABET.len())];
        if candidate != original {
            bytes[index] = candidate;
            break;
        }
    }
    String::from_utf8(bytes).unwrap()
}

fn sample_tokens() -> Vec<String> {
    [
        ("u1", "2-1", "hello"),
        ("u2", "lecture.7", "a slightly longer summary of the chat"),
        ("student-99", "pre:3", ""),
    ]
    .into_iter()
    .map(|(user, task, summary)| seal(SECRET, &SummaryInput::new(user, task, summary)).unwrap())
    .collect()
}

#[test]
fn single_character_mutations_are_rejected() {
    let mut rng = rand::rng();
    let mut checked = 0;

    for token in sample_tokens() {
        assert!(unseal(SECRET, &token).is_some());

        // Everything after "SS1." is payload or signature text.
        let body_start = token.find('.').unwrap() + 1;
        let signature_dot = token.rfind('.').unwrap();

        for _ in 0..12 {
            let index = loop {
                let candidate = rng.random_range(body_start..token.len());
                if candidate != signature_dot {
                    break candidate;
                }
            };
            let mutated = mutate_at(&token, index, &mut rng);
            assert!(
                unseal(SECRET, &mutated).is_none(),
                "mutation at {index} was accepted: {mutated}"
            );
            checked += 1;
        }
    }

    assert!(checked >= 20);
}

#[test]
fn every_signature_position_is_covered() {
    let token = sample_tokens().remove(0);
    let signature_start = token.rfind('.').unwrap() + 1;
    let mut rng = rand::rng();

    for index in signature_start..token.len() {
        let mutated = mutate_at(&token, index, &mut rng);
        assert!(unseal(SECRET, &mutated).is_none(), "signature index {index}");
    }
}

#[test]
fn swapping_signatures_between_tokens_is_rejected() {
    let tokens = sample_tokens();
    let (head_a, _) = tokens[0].rsplit_once('.').unwrap();
    let (_, sig_b) = tokens[1].rsplit_once('.').unwrap();
    assert!(unseal(SECRET, &format!("{head_a}.{sig_b}")).is_none());
}
