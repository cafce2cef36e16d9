use darkroom_core::{AppViewModel, Mode, ResultRowView};

/// Coarse stage label shown next to the synthetic progress value.
pub fn progress_label(progress: u8) -> &'static str {
    match progress {
        0..=29 => "Uploading input...",
        30..=59 => "Processing...",
        60..=89 => "Generating result...",
        90..=99 => "Almost done...",
        _ => "Done",
    }
}

pub fn status_line(view: &AppViewModel) -> String {
    if view.submitting {
        format!(
            "Working [{:>3}%] {}",
            view.progress,
            progress_label(view.progress)
        )
    } else {
        format!("Idle | results: {}", view.results.len())
    }
}

pub fn format_result_row(index: usize, row: &ResultRowView) -> String {
    let kind = match (row.mode, row.image_count) {
        (Mode::Generate, _) => "Generated".to_string(),
        (Mode::Edit, count) => {
            let n = count.unwrap_or(1);
            format!("Edited {} image{}", n, if n == 1 { "" } else { "s" })
        }
    };
    format!(
        "[#{num}] {kind} at {time} — {url} ({prompt})",
        num = index + 1,
        kind = kind,
        time = row.completed_at.format("%H:%M:%S"),
        url = row.image_ref,
        prompt = row.prompt,
    )
}
