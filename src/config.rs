//! Configuração do roombuddies carregada a partir de `roombuddies.toml`.
//!
//! A struct [`BuddiesConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! As variáveis de ambiente `ROOMBUDDIES_LOG` e `ROOMBUDDIES_SEED` têm
//! precedência sobre o arquivo.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::source::LoadingTiming;

/// Configuração de nível superior carregada de `roombuddies.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BuddiesConfig {
    /// Filtro de log do tracing (ex.: "info", "roombuddies=debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Semente para o gerador aleatório. Sem semente, usa entropia do sistema.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Atraso da captura de voz simulada, em milissegundos.
    #[serde(default = "default_voice_delay_ms")]
    pub voice_delay_ms: u64,

    /// Intervalo entre ticks da tela de carregamento, em milissegundos.
    #[serde(default = "default_loading_tick_ms")]
    pub loading_tick_ms: u64,

    /// Incremento de progresso por tick (em pontos percentuais).
    #[serde(default = "default_loading_step")]
    pub loading_step: u8,

    /// Espera entre 100% e o callback de conclusão, em milissegundos.
    #[serde(default = "default_loading_complete_delay_ms")]
    pub loading_complete_delay_ms: u64,

    /// Quantidade de preferências para liberar a busca de colegas.
    #[serde(default = "default_min_preferences")]
    pub min_preferences: usize,

    /// Quantidade de elementos flutuantes decorativos.
    #[serde(default = "default_floating_elements")]
    pub floating_elements: usize,
}

// Valor padrão para o filtro de log: "warn".
fn default_log_level() -> String {
    "warn".to_string()
}

// Valor padrão para o atraso da voz: 3000ms.
fn default_voice_delay_ms() -> u64 {
    3000
}

// Valor padrão para o tick de carregamento: 100ms.
fn default_loading_tick_ms() -> u64 {
    100
}

// Valor padrão para o incremento: 2%.
fn default_loading_step() -> u8 {
    2
}

// Valor padrão para a espera final: 800ms.
fn default_loading_complete_delay_ms() -> u64 {
    800
}

fn default_min_preferences() -> usize {
    3
}

fn default_floating_elements() -> usize {
    15
}

impl Default for BuddiesConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            seed: None,
            voice_delay_ms: default_voice_delay_ms(),
            loading_tick_ms: default_loading_tick_ms(),
            loading_step: default_loading_step(),
            loading_complete_delay_ms: default_loading_complete_delay_ms(),
            min_preferences: default_min_preferences(),
            floating_elements: default_floating_elements(),
        }
    }
}

impl BuddiesConfig {
    /// Carrega a configuração de `roombuddies.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(Path::new("roombuddies.toml"))?;

        // Variáveis de ambiente têm precedência sobre o arquivo de configuração.
        if let Ok(level) = std::env::var("ROOMBUDDIES_LOG")
            && !level.is_empty()
        {
            config.log_level = level;
        }
        if let Ok(raw) = std::env::var("ROOMBUDDIES_SEED")
            && !raw.is_empty()
        {
            config.seed = Some(
                raw.parse()
                    .with_context(|| format!("ROOMBUDDIES_SEED is not a number: {raw}"))?,
            );
        }

        Ok(config)
    }

    /// Lê um arquivo específico; ausência do arquivo resulta nos defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str::<BuddiesConfig>(&contents)
            .with_context(|| format!("invalid config in {}", path.display()))?;
        Ok(config)
    }

    pub fn voice_delay(&self) -> Duration {
        Duration::from_millis(self.voice_delay_ms)
    }

    pub fn loading_timing(&self) -> LoadingTiming {
        LoadingTiming {
            tick: Duration::from_millis(self.loading_tick_ms),
            step: self.loading_step,
            complete_delay: Duration::from_millis(self.loading_complete_delay_ms),
        }
    }
}
