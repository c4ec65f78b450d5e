use crate::format::{parse_release_date, rating_color};
use crate::view::{App, ViewState};
use movie_core::{ListItemView, MovieRecord};
use std::fmt::Write;

const HEADER: &str = "🎬 Movie Database\nBrowse your favorite classic collection\n\n";

/// Plain-text renderer for the terminal. With `ansi` off the output has no
/// escape codes at all.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub ansi: bool,
}

impl Renderer {
    pub fn new(ansi: bool) -> Self {
        Self { ansi }
    }

    pub fn render(&self, app: &App) -> String {
        let mut out = String::from(HEADER);
        match &app.view {
            ViewState::Loading => out.push_str("Loading Movies...\n"),
            ViewState::List => self.render_list(&mut out, &app.movies),
            ViewState::Detail(movie) => self.render_detail(&mut out, movie),
        }
        out
    }

    pub fn scroll_to_top(&self) -> &'static str {
        if self.ansi {
            "\x1b[2J\x1b[H"
        } else {
            ""
        }
    }

    fn render_list(&self, out: &mut String, movies: &[ListItemView]) {
        for (i, movie) in movies.iter().enumerate() {
            let _ = writeln!(out, "[{}] {}", i + 1, movie.title_text().unwrap_or_default());
            if let Some(tagline) = non_empty(movie.tagline_text()) {
                let _ = writeln!(out, "    \"{tagline}\"");
            }
            let badge = self.badge(movie.rating_text().unwrap_or_default(), movie.rating());
            let _ = writeln!(out, "    {badge}  View Details →\n");
        }
    }

    fn render_detail(&self, out: &mut String, movie: &MovieRecord) {
        let _ = writeln!(out, "← Back to Movies (b)\n");
        let _ = writeln!(out, "{}\n", self.bold(&movie.title_text().unwrap_or_default()));
        let _ = writeln!(out, "  {:<10}{} min", "Runtime", movie.runtime_text().unwrap_or_default());
        let _ = writeln!(out, "  {:<10}{} / 10", "Rating", movie.rating_text().unwrap_or_default());
        let _ = writeln!(out, "  {:<10}{}\n", "Released", parse_release_date(movie.release_date_text().as_deref()));
        if let Some(tagline) = non_empty(movie.tagline_text()) {
            let _ = writeln!(out, "\"{tagline}\"\n");
        }
        let _ = writeln!(out, "{}", self.bold("Overview"));
        let _ = writeln!(out, "{}", movie.overview_text().unwrap_or_default());
    }

    fn badge(&self, text: String, rating: Option<f64>) -> String {
        if !self.ansi {
            return format!("[{text}]");
        }
        let (r, g, b) = rating_color(rating).rgb();
        format!("\x1b[1;38;2;255;255;255;48;2;{r};{g};{b}m {text} \x1b[0m")
    }

    fn bold(&self, text: &str) -> String {
        if self.ansi {
            format!("\x1b[1m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_core::MovieId;
    use serde_json::json;

    fn sample_app() -> App {
        let mut app = App::new();
        app.on_list_loaded(Ok(vec![
            ListItemView {
                id: Some(MovieId::from(862i64)),
                title: Some("Toy Story".into()),
                tagline: None,
                vote_average: Some(json!(7.7)),
            },
            ListItemView {
                id: Some(MovieId::from("8844")),
                title: Some("Jumanji".into()),
                tagline: Some("Roll the dice and unleash the excitement!".into()),
                vote_average: Some(json!(8)),
            },
        ]));
        app
    }

    #[test]
    fn loading_screen() {
        let text = Renderer::new(false).render(&App::new());
        assert!(text.contains("Loading Movies..."));
    }

    #[test]
    fn list_numbers_cards_and_quotes_taglines() {
        let text = Renderer::new(false).render(&sample_app());
        assert!(text.contains("[1] Toy Story"));
        assert!(text.contains("[2] Jumanji"));
        assert!(text.contains("\"Roll the dice and unleash the excitement!\""));
        assert!(text.contains("[7.7]  View Details"));
        assert!(text.contains("[8]  View Details"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn badge_uses_rating_color() {
        let text = Renderer::new(true).render(&sample_app());
        assert!(text.contains("48;2;255;152;0m 7.7 "));
        assert!(text.contains("48;2;76;175;80m 8 "));
    }

    #[test]
    fn string_ratings_are_colored_by_value() {
        let mut app = App::new();
        app.on_list_loaded(Ok(vec![ListItemView {
            id: Some(MovieId::from("1")),
            title: Some(json!(1984)),
            tagline: None,
            vote_average: Some(json!("9")),
        }]));
        let text = Renderer::new(true).render(&app);
        assert!(text.contains("[1] 1984"));
        assert!(text.contains("48;2;76;175;80m 9 "));
    }

    #[test]
    fn detail_view_fields() {
        let mut app = sample_app();
        let record: MovieRecord = serde_json::from_value(serde_json::json!({
            "id": 862,
            "title": "Toy Story",
            "tagline": "",
            "vote_average": 7.7,
            "runtime": 81,
            "release_date": "30/10/95",
            "overview": "Led by Woody, Andy's toys live happily in his room."
        }))
        .unwrap();
        app.on_detail_loaded(Ok(record));

        let text = Renderer::new(false).render(&app);
        assert!(text.contains("← Back to Movies"));
        assert!(text.contains("Runtime   81 min"));
        assert!(text.contains("Rating    7.7 / 10"));
        assert!(text.contains("Released  10/30/1995"));
        assert!(text.contains("Led by Woody"));
        assert!(!text.contains("\"\""));
        assert!(!text.contains("[1]"));
    }

    #[test]
    fn detail_without_date_shows_placeholder() {
        let mut app = sample_app();
        app.on_detail_loaded(Ok(MovieRecord::default()));
        let text = Renderer::new(false).render(&app);
        assert!(text.contains("Released  Unknown Date"));
    }
}
