//! Localized fixed strings.
//!
//! Templates exist natively for a subset of languages. `None` means the
//! caller must translate the English text instead.

use crate::language::LanguageCode;

/// Greeting shown when a conversation starts.
pub fn greeting(language: LanguageCode) -> Option<&'static str> {
    match language {
        LanguageCode::English => Some("Hello! Ask me anything."),
        LanguageCode::Hindi => Some("नमस्ते! मुझसे कुछ भी पूछें।"),
        LanguageCode::Telugu => Some("హలో! నన్ను ఏదైనా అడగండి."),
        _ => None,
    }
}

pub fn not_found(language: LanguageCode) -> Option<&'static str> {
    match language {
        LanguageCode::English => Some("Sorry, I couldn't find an answer."),
        LanguageCode::Hindi => Some("माफ़ कीजिए, मुझे उत्तर नहीं मिला।"),
        LanguageCode::Telugu => Some("క్షమించండి, నాకు సమాధానం దొరకలేదు."),
        _ => None,
    }
}

/// Header placed above a "did you mean" topic list.
pub fn suggestion_header(language: LanguageCode) -> Option<&'static str> {
    match language {
        LanguageCode::English => {
            Some("I couldn't find a direct answer. Did you mean one of these topics?")
        }
        LanguageCode::Hindi => Some(
            "मुझे सीधा उत्तर नहीं मिला। क्या आप इनमें से किसी विषय के बारे में पूछना चाहेंगे?",
        ),
        LanguageCode::Telugu => Some(
            "నాకు ప్రత్యక్ష సమాధానం దొరకలేదు. మీరు వీటిలో ఏదైనా విషయాన్ని అడగాలనుకుంటున్నారా?",
        ),
        _ => None,
    }
}

/// Renders a header followed by one `- title` line per topic.
pub fn render_suggestions(header: &str, titles: &[String]) -> String {
    let mut text = header.to_string();
    for title in titles {
        text.push_str("\n- ");
        text.push_str(title);
    }
    text
}
