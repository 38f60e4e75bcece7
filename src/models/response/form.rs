use std::collections::BTreeMap;

use super::types::AnswerInput;

/// Slot indices at or above this are ignored.
const MAX_SLOTS: usize = 1000;

/// Decoded fill-out form.
///
/// The form posts `name`, `csrf_token` and, per question slot N,
/// `answers-N-response_tak`, `answers-N-response_nie` (checkboxes, present
/// when ticked) and `answers-N-explanation`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillForm {
    pub name: String,
    pub csrf_token: String,
    pub answers: Vec<AnswerInput>,
}

impl FillForm {
    pub fn from_fields(fields: &[(String, String)]) -> Self {
        let mut form = FillForm::default();
        let mut slots: BTreeMap<usize, AnswerInput> = BTreeMap::new();

        for (key, value) in fields {
            match key.as_str() {
                "name" => form.name = value.clone(),
                "csrf_token" => form.csrf_token = value.clone(),
                _ => {
                    let Some((index, field)) = parse_slot_key(key) else {
                        continue;
                    };
                    let slot = slots.entry(index).or_default();
                    match field {
                        "response_tak" => slot.response_tak = is_checked(value),
                        "response_nie" => slot.response_nie = is_checked(value),
                        "explanation" => {
                            slot.explanation = Some(value.clone()).filter(|v| !v.trim().is_empty())
                        }
                        _ => {}
                    }
                }
            }
        }

        // Slots with nothing posted still occupy their position.
        if let Some(&last) = slots.keys().next_back() {
            form.answers = (0..=last)
                .map(|i| slots.remove(&i).unwrap_or_default())
                .collect();
        }
        form
    }
}

/// `answers-3-explanation` → (3, "explanation")
fn parse_slot_key(key: &str) -> Option<(usize, &str)> {
    let rest = key.strip_prefix("answers-")?;
    let (index, field) = rest.split_once('-')?;
    let index: usize = index.parse().ok()?;
    (index < MAX_SLOTS).then_some((index, field))
}

fn is_checked(value: &str) -> bool {
    !matches!(value, "" | "n" | "no" | "false" | "off" | "0")
}
