use colored::Colorize;
use moviehub::api::{CmdMessage, MessageLevel};
use moviehub::config::{CatalogConfig, CONFIG_KEYS};
use moviehub::model::Movie;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const GENRE_WIDTH: usize = 12;
const RATING_WIDTH: usize = 6;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per movie: id, title and year on the left, genre and rating
/// right-aligned.
pub(super) fn render_movie_list(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return "No movies found.\n".to_string();
    }

    let id_width = movies
        .iter()
        .map(|m| m.id.to_string().width())
        .max()
        .unwrap_or(1);

    let mut output = String::new();
    for movie in movies {
        let idx_str = format!("{:>width$}. ", movie.id, width = id_width);
        let left_prefix = "  ";
        let fixed_width = left_prefix.width() + idx_str.width() + GENRE_WIDTH + RATING_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let title = format!("{} ({})", movie.title, movie.year);
        let title_display = truncate_to_width(&title, available);
        let padding = available.saturating_sub(title_display.width());

        let genre = truncate_to_width(&movie.genre, GENRE_WIDTH);
        let genre_padding = GENRE_WIDTH.saturating_sub(genre.width());
        let rating = format!("{:>width$.1}", movie.rating, width = RATING_WIDTH);

        output.push_str(&format!(
            "{}{}{}{}{}{}{}\n",
            left_prefix,
            idx_str.yellow(),
            title_display,
            " ".repeat(padding),
            genre.cyan(),
            " ".repeat(genre_padding),
            rating.dimmed()
        ));
    }
    output
}

pub(super) fn render_movie_detail(movie: &Movie) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} {}\n",
        movie.id.to_string().yellow(),
        movie.title.bold()
    ));
    output.push_str("--------------------------------\n");
    let rows = [
        ("Year", movie.year.to_string()),
        ("Genre", movie.genre.clone()),
        ("Rating", format!("{:.1}/10", movie.rating)),
        ("Duration", movie.display_duration()),
        ("Link", movie.download_link.clone()),
    ];
    for (label, value) in rows {
        let label = format!("{:<10}", format!("{}:", label));
        output.push_str(&format!("{}{}\n", label.dimmed(), value));
    }
    output.push('\n');
    output.push_str(&movie.description);
    output.push('\n');
    output
}

pub(super) fn render_config(config: &CatalogConfig, key: Option<&str>) -> String {
    let keys: Vec<&str> = match key {
        Some(key) => vec![key],
        None => CONFIG_KEYS.to_vec(),
    };
    let lines: Vec<String> = keys
        .into_iter()
        .filter_map(|k| config.get(k).map(|v| format!("{} = {}", k, v)))
        .collect();
    render_text_list(&lines, "No configuration values.")
}

pub(super) fn render_text_list(lines: &[String], empty: &str) -> String {
    if lines.is_empty() {
        return format!("{}\n", empty);
    }
    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
