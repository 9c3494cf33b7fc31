use arith_core::{generate, parse_answer, DailyStats, Difficulty, Problem};
use crate::storage::{self, Tracker};
use eframe::egui;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Feedback {
    Pending,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    SetDifficulty(Difficulty),
    ToggleStats,
    Submit,
    RevealAnswer,
    Next,
}

pub struct ArithmeticApp {
    tracker: Tracker,
    difficulty: Difficulty,
    problem: Problem,
    answer_input: String,
    feedback: Feedback,
    show_answer: bool,
    show_stats: bool,
    stats: DailyStats,
}

impl Default for ArithmeticApp {
    fn default() -> Self {
        Self::with_tracker(storage::open_tracker())
    }
}

impl ArithmeticApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn with_tracker(mut tracker: Tracker) -> Self {
        let difficulty = Difficulty::Easy;
        let stats = tracker.stats_for_today();
        Self {
            tracker,
            difficulty,
            problem: generate(difficulty),
            answer_input: String::new(),
            feedback: Feedback::Pending,
            show_answer: false,
            show_stats: false,
            stats,
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::SetDifficulty(difficulty) => {
                if difficulty != self.difficulty {
                    self.difficulty = difficulty;
                    self.next_problem();
                }
            }
            Action::ToggleStats => {
                self.show_stats = !self.show_stats;
                self.stats = self.tracker.stats_for_today();
            }
            Action::Submit => self.submit_answer(),
            Action::RevealAnswer => self.show_answer = true,
            Action::Next => self.next_problem(),
        }
    }

    fn submit_answer(&mut self) {
        if self.feedback != Feedback::Pending {
            return;
        }

        let value = match parse_answer(&self.answer_input) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "ignoring input");
                self.answer_input.clear();
                return;
            }
        };

        let correct = self.problem.submit(value);
        if let Err(e) = self.tracker.record_result(&self.problem) {
            warn!(error = %e, "could not save result");
        }

        self.feedback = if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        };
        self.stats = self.tracker.stats_for_today();
    }

    fn next_problem(&mut self) {
        self.problem = generate(self.difficulty);
        self.answer_input.clear();
        self.feedback = Feedback::Pending;
        self.show_answer = false;
        self.stats = self.tracker.stats_for_today();
    }

    fn problem_view(&mut self, ui: &mut egui::Ui, action: &mut Option<Action>) {
        let reveal = self.feedback == Feedback::Correct || self.show_answer;
        ui.label(
            egui::RichText::new(self.problem.display(reveal))
                .size(48.0)
                .strong(),
        );
        ui.add_space(20.0);

        match self.feedback {
            Feedback::Pending => {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.answer_input)
                        .hint_text("Enter answer")
                        .font(egui::TextStyle::Heading)
                        .desired_width(150.0)
                        .horizontal_align(egui::Align::Center),
                );

                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    *action = Some(Action::Submit);
                }

                response.request_focus();

                ui.add_space(15.0);

                if ui
                    .add_sized([120.0, 40.0], egui::Button::new("Submit"))
                    .clicked()
                {
                    *action = Some(Action::Submit);
                }
                if ui.small_button("Skip").clicked() {
                    *action = Some(Action::Next);
                }
            }
            Feedback::Correct => {
                ui.label(
                    egui::RichText::new("Correct!")
                        .size(28.0)
                        .color(egui::Color32::from_rgb(50, 205, 50)),
                );
                ui.add_space(15.0);
                if ui
                    .add_sized([120.0, 40.0], egui::Button::new("Next"))
                    .clicked()
                {
                    *action = Some(Action::Next);
                }
            }
            Feedback::Incorrect => {
                ui.label(
                    egui::RichText::new("Not quite. Try another one!")
                        .size(24.0)
                        .color(egui::Color32::from_rgb(220, 20, 60)),
                );
                ui.add_space(10.0);

                if self.show_answer {
                    ui.label(
                        egui::RichText::new(format!("The answer is {}", self.problem.answer()))
                            .size(20.0),
                    );
                } else if ui.button("Show answer").clicked() {
                    *action = Some(Action::RevealAnswer);
                }

                ui.add_space(15.0);
                if ui
                    .add_sized([120.0, 40.0], egui::Button::new("Next"))
                    .clicked()
                {
                    *action = Some(Action::Next);
                }
            }
        }
    }

    fn stats_view(&self, ui: &mut egui::Ui) {
        let stats = &self.stats;

        ui.label(egui::RichText::new("Today's progress").size(24.0).strong());
        ui.add_space(10.0);
        ui.label(
            egui::RichText::new(format!("{}%", stats.accuracy_percent()))
                .size(48.0)
                .strong(),
        );
        ui.label(stats.grade().message());
        ui.add_space(15.0);

        ui.horizontal(|ui| {
            ui.colored_label(
                egui::Color32::from_rgb(50, 205, 50),
                format!("Correct: {}", stats.correct),
            );
            ui.separator();
            ui.colored_label(
                egui::Color32::from_rgb(220, 20, 60),
                format!("Incorrect: {}", stats.incorrect),
            );
        });

        ui.add_space(15.0);

        for difficulty in Difficulty::ALL {
            let tier = stats.by_difficulty.get(difficulty);
            ui.label(format!(
                "{}: {} / {} ({} wrong)",
                difficulty.label(),
                tier.correct,
                tier.total,
                tier.incorrect()
            ));
            ui.add(
                egui::ProgressBar::new(tier.accuracy_percent() as f32 / 100.0)
                    .desired_width(250.0),
            );
            ui.add_space(5.0);
        }
    }
}

impl eframe::App for ArithmeticApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading("Arithmetic Practice");
                ui.add_space(15.0);

                ui.horizontal(|ui| {
                    for difficulty in Difficulty::ALL {
                        if ui
                            .selectable_label(self.difficulty == difficulty, difficulty.label())
                            .clicked()
                        {
                            action = Some(Action::SetDifficulty(difficulty));
                        }
                    }
                });

                ui.add_space(10.0);

                let toggle = if self.show_stats {
                    "Back to practice"
                } else {
                    "Today's stats"
                };
                if ui.button(toggle).clicked() {
                    action = Some(Action::ToggleStats);
                }

                ui.add_space(25.0);

                if self.show_stats {
                    self.stats_view(ui);
                } else {
                    self.problem_view(ui, &mut action);
                }
            });
        });

        if let Some(action) = action {
            self.apply(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arith_core::{KeyValueStore, MemoryStore, StatsTracker};

    fn app() -> ArithmeticApp {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        ArithmeticApp::with_tracker(StatsTracker::new(store))
    }

    #[test]
    fn correct_submission_is_recorded() {
        let mut app = app();
        app.answer_input = app.problem.answer().to_string();
        app.apply(Action::Submit);

        assert_eq!(app.feedback, Feedback::Correct);
        assert_eq!(app.stats.total, 1);
        assert_eq!(app.stats.by_difficulty.easy.correct, 1);
    }

    #[test]
    fn non_numeric_input_is_not_a_submission() {
        let mut app = app();
        app.answer_input = "seven".to_string();
        app.apply(Action::Submit);

        assert_eq!(app.feedback, Feedback::Pending);
        assert!(app.answer_input.is_empty());
        assert_eq!(app.stats.total, 0);
    }

    #[test]
    fn wrong_answer_then_next_resets_the_round() {
        let mut app = app();
        app.apply(Action::SetDifficulty(Difficulty::Hard));
        app.answer_input = (app.problem.answer() + 1).to_string();
        app.apply(Action::Submit);
        assert_eq!(app.feedback, Feedback::Incorrect);

        app.apply(Action::Submit);
        assert_eq!(app.stats.total, 1);

        app.apply(Action::RevealAnswer);
        assert!(app.show_answer);

        app.apply(Action::Next);
        assert_eq!(app.feedback, Feedback::Pending);
        assert!(!app.show_answer);
        assert_eq!(app.problem.difficulty(), Difficulty::Hard);
        assert_eq!(app.stats.incorrect, 1);
        assert_eq!(app.stats.by_difficulty.hard.total, 1);
        assert_eq!(app.stats.by_difficulty.hard.incorrect(), 1);
    }
}
