//! Interface de linha de comando do roombuddies baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (quiz, swipe, voice,
//! loading, hostels, decor) e flags globais (--seed, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Room Buddies: fluxos de compatibilidade e matching de colegas de quarto no terminal.
#[derive(Debug, Parser)]
#[command(name = "roombuddies", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Semente do gerador aleatório (tem precedência sobre config e ambiente).
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Responde ao questionário de compatibilidade.
    Quiz {
        /// Arquivo JSON ou TOML com respostas (id da pergunta → valor).
        /// Sem ele, o questionário é interativo.
        #[arg(long)]
        answers: Option<PathBuf>,
    },

    /// Percorre os perfis de colegas, aceitando ou recusando cada um.
    Swipe {
        /// Decisões pré-definidas: `y` aceita, `n` recusa (ex.: "yynny").
        #[arg(long)]
        decisions: Option<String>,
    },

    /// Simula a captura de preferências por voz.
    Voice {
        /// Quantas capturas simular.
        #[arg(long, default_value_t = 3)]
        takes: usize,
    },

    /// Mostra a tela de carregamento até a conclusão.
    Loading,

    /// Lista os hostels disponíveis, salvando os ids informados.
    Hostels {
        /// Id de hostel a alternar na lista de salvos (pode repetir).
        #[arg(long = "save")]
        save: Vec<String>,
    },

    /// Gera o layout dos elementos flutuantes decorativos em JSON.
    Decor {
        /// Quantidade de elementos (padrão vem da configuração).
        #[arg(long)]
        count: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_quiz_with_answers_file() {
        let cli = Cli::parse_from(["roombuddies", "quiz", "--answers", "answers.toml"]);
        match cli.command {
            Command::Quiz { answers } => {
                assert_eq!(answers.unwrap(), PathBuf::from("answers.toml"));
            }
            _ => panic!("expected Quiz command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from(["roombuddies", "--seed", "7", "--verbose", "decor"]);
        assert!(cli.verbose);
        assert_eq!(cli.seed, Some(7));
        assert!(matches!(cli.command, Command::Decor { count: None }));
    }

    #[test]
    fn cli_parses_repeated_saves() {
        let cli = Cli::parse_from(["roombuddies", "hostels", "--save", "1", "--save", "2"]);
        match cli.command {
            Command::Hostels { save } => assert_eq!(save, vec!["1", "2"]),
            _ => panic!("expected Hostels command"),
        }
    }

    #[test]
    fn cli_voice_defaults_to_three_takes() {
        let cli = Cli::parse_from(["roombuddies", "voice"]);
        assert!(matches!(cli.command, Command::Voice { takes: 3 }));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
