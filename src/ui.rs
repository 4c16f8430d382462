//! Interface de terminal do roombuddies: barras de progresso e saída colorida.
//!
//! Usa as crates `indicatif` para barras e spinners e `console` para
//! estilização com cores. Cada fluxo (questionário, voz, carregamento) tem
//! sua própria visão que acompanha o estado no terminal.

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::Hostel;
use crate::source::LoadingSnapshot;
use crate::state_machine::{Item, Modality, Payload, Response, Summary};

/// Estilos de cor compartilhados pelas visões.
#[derive(Debug, Clone)]
pub struct Palette {
    pub green: Style,
    pub red: Style,
    pub yellow: Style,
    pub cyan: Style,
    pub dim: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            cyan: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }
}

/// Barra de progresso do questionário ("Question i of n").
pub struct QuizView {
    // Barra do indicatif com uma posição por pergunta.
    pb: ProgressBar,
    palette: Palette,
}

impl QuizView {
    pub fn start(total: usize) -> Self {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:30.magenta/white} Question {pos} of {len}")
                .expect("invalid template")
                .progress_chars("█▓░"),
        );
        Self {
            pb,
            palette: Palette::default(),
        }
    }

    /// Mostra a pergunta atual com suas opções e a resposta já registrada.
    pub fn show(&self, item: &Item, index: usize, answer: Option<&Response>) {
        self.pb.set_position(index as u64);
        let Payload::Question {
            prompt, category, ..
        } = &item.payload
        else {
            return;
        };

        self.pb.println(String::new());
        self.pb.println(format!("[{}] {}", self.palette.cyan.apply_to(category), prompt));
        match item.modality {
            Modality::Scale => {
                self.pb.println(format!(
                    "  {}",
                    self.palette.dim.apply_to("1 = Not Important … 5 = Very Important")
                ));
            }
            _ => {
                for (i, option) in item.options().iter().enumerate() {
                    let marked = match answer {
                        Some(Response::Choice(choice)) => choice == option,
                        Some(Response::Choices(set)) => set.contains(option),
                        _ => false,
                    };
                    let mark = if marked { "●" } else { "○" };
                    self.pb.println(format!("  {mark} {}. {option}", i + 1));
                }
            }
        }
        if let Some(answer) = answer {
            self.pb.println(format!(
                "  {} {answer}",
                self.palette.green.apply_to("✓")
            ));
        }
    }

    /// Aviso quando "next" é pedido sem resposta.
    pub fn blocked(&self) {
        self.pb.println(format!(
            "  {} Answer this question before moving on",
            self.palette.yellow.apply_to("!")
        ));
    }

    pub fn rejected(&self, reason: &str) {
        self.pb
            .println(format!("  {} {reason}", self.palette.red.apply_to("✗")));
    }

    /// Finaliza a barra e exibe o resumo final.
    pub fn complete(&self, summary: &Summary) {
        self.pb.finish_and_clear();
        println!(
            "  {} Compatibility Profile Complete!",
            self.palette.green.apply_to("✓")
        );
        print_summary(summary);
    }
}

/// Barra da tela de carregamento, atualizada a cada tick.
#[derive(Clone)]
pub struct LoadingView {
    pb: ProgressBar,
}

impl LoadingView {
    pub fn start() -> Self {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.magenta/white} {pos:>3}% {msg}")
                .expect("invalid template")
                .progress_chars("█▓░"),
        );
        Self { pb }
    }

    pub fn update(&self, snapshot: LoadingSnapshot) {
        self.pb.set_position(snapshot.progress as u64);
        self.pb.set_message(snapshot.caption);
    }

    pub fn finish(&self) {
        self.pb.finish_with_message("Room Buddies is ready");
    }

    pub fn abandon(&self) {
        self.pb.abandon_with_message("interrupted");
    }
}

/// Spinner exibido enquanto a captura de voz está pendente.
pub struct ListeningView {
    pb: ProgressBar,
    palette: Palette,
}

impl ListeningView {
    pub fn start() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.magenta} {msg}")
                .expect("invalid template"),
        );
        pb.set_message("Listening... tell us about your ideal living situation");
        pb.enable_steady_tick(Duration::from_millis(100));
        Self {
            pb,
            palette: Palette::default(),
        }
    }

    pub fn heard(&self, transcript: &str, added: bool) {
        self.pb.finish_and_clear();
        let mark = if added {
            self.palette.green.apply_to("✓")
        } else {
            self.palette.yellow.apply_to("=")
        };
        println!("  {mark} \"{transcript}\"");
    }

    pub fn cancelled(&self) {
        self.pb.finish_and_clear();
        println!("  {}", self.palette.dim.apply_to("stopped listening"));
    }
}

/// Cartão de perfil da tela de swipe, com indicador de posição.
pub fn print_profile(item: &Item, markers: &[bool], matches: usize) {
    let palette = Palette::default();
    let Payload::Profile(profile) = &item.payload else {
        return;
    };

    println!();
    let verified = if profile.verified { " ✔ Verified" } else { "" };
    println!(
        "{}, {}{}  {}",
        palette.cyan.apply_to(&profile.name),
        profile.age,
        verified,
        palette.green.apply_to(format!("{}% match", profile.match_percentage))
    );
    println!("  {}", palette.dim.apply_to(&profile.location));
    println!("  {}", profile.bio);
    println!("  Badges: {}", profile.badges.join(" · "));
    println!("  Interests: {}", profile.interests.join(", "));
    let dots: String = markers.iter().map(|m| if *m { '●' } else { '○' }).collect();
    println!("  {dots}   {matches} matches so far");
}

pub fn print_hostel(hostel: &Hostel, saved: bool) {
    let palette = Palette::default();
    let heart = if saved {
        palette.red.apply_to("♥").to_string()
    } else {
        "♡".to_string()
    };
    println!(
        "{heart} [{}] {}  ★ {} ({} reviews)",
        hostel.id,
        palette.cyan.apply_to(&hostel.name),
        hostel.rating,
        hostel.review_count
    );
    println!(
        "    {} · {} · {} rooms · {} roommate matches",
        hostel.distance, hostel.price_range, hostel.available_rooms, hostel.roommate_matches
    );
    println!("    {}", hostel.description);
    println!("    {}", palette.dim.apply_to(hostel.amenities.join(", ")));
}

/// Imprime o resumo da sessão formatado em JSON.
pub fn print_summary(summary: &Summary) {
    let palette = Palette::default();
    println!();
    println!("{}", palette.green.apply_to("─── Session Summary ───"));
    println!(
        "{}",
        serde_json::to_string_pretty(summary).unwrap_or_default()
    );
}
