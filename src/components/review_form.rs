use leptos::*;
use leptos::ev::SubmitEvent;

/// Ratings are always 1..=5 whatever the input element lets through;
/// out-of-range or non-numeric text falls back into range.
fn parse_rating(raw: &str) -> u8 {
    raw.parse::<u8>().map(|n| n.clamp(1, 5)).unwrap_or(5)
}

/// Review submission form shown under each book card.
/// Submits `(rating, optional headline, content)` and resets.
#[component]
pub fn ReviewForm(on_submit: Box<dyn Fn(u8, Option<String>, String)>) -> impl IntoView {
    let (rating, set_rating) = create_signal(5u8); // Default rating to 5
    let (title, set_title) = create_signal(String::new());
    let (content, set_content) = create_signal(String::new());

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if content.get().trim().is_empty() {
            return;
        }
        let headline = {
            let t = title.get();
            if t.trim().is_empty() { None } else { Some(t) }
        };
        on_submit(rating.get(), headline, content.get());

        // Reset values
        set_rating.set(5);
        set_title.set(String::new());
        set_content.set(String::new());
    };

    view! {
        <form class="review-form" on:submit=handle_submit>
            <h4>{ "Write a Review" }</h4>
            <label>
                { "Rating (1-5)" }
                <input
                    type="number"
                    min="1"
                    max="5"
                    value={rating.get()}
                    on:input=move |e| set_rating.set(parse_rating(&event_target_value(&e)))
                />
            </label>
            <input
                type="text"
                placeholder="Headline (optional)"
                prop:value=title
                on:input=move |e| set_title.set(event_target_value(&e))
            />
            <textarea
                placeholder="What did you think?"
                prop:value=content
                on:input=move |e| set_content.set(event_target_value(&e))
            />
            <button type="submit">{ "Submit Review" }</button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_input_is_clamped_into_range() {
        assert_eq!(parse_rating("0"), 1);
        assert_eq!(parse_rating("200"), 5);
        assert_eq!(parse_rating("3"), 3);
        assert_eq!(parse_rating("not a number"), 5);
        assert_eq!(parse_rating(""), 5);
    }
}
