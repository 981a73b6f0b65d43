use std::collections::HashSet;

use super::domain::{NotaRecebida, NotaStatus, Origem, ValidationNote};
use super::extract::sanitizar_chave;

/// Coerces raw inbound notes into the canonical shape, dropping the
/// unusable ones. Idempotent: normalizing an already-normalized list
/// changes nothing.
///
/// Dedup by normalized key is first-seen-wins, the same policy the
/// extraction merge applies, so the two paths agree on which duplicate
/// survives.
pub fn normalizar_notas(notas: &[NotaRecebida]) -> Vec<ValidationNote> {
    let mut vistas = HashSet::new();
    let mut saida = Vec::new();

    for nota in notas {
        let Some(chave) = sanitizar_chave(&nota.chave) else {
            continue;
        };
        if !vistas.insert(chave.clone()) {
            continue;
        }

        let valor = if nota.valor.is_finite() {
            nota.valor.round().max(0.0) as u64
        } else {
            0
        };

        let origem = if nota.origem.as_deref() == Some("CNAB") {
            Origem::Cnab
        } else {
            Origem::Xml
        };

        let status = match nota.status.as_deref() {
            Some("recusada") => NotaStatus::Recusada,
            Some("pendente") => NotaStatus::Pendente,
            _ => NotaStatus::Validada,
        };

        let tag = nota
            .tag
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                if status == NotaStatus::Validada {
                    "OK".to_string()
                } else {
                    "REVISAO".to_string()
                }
            });

        let motivo = nota
            .motivo
            .as_deref()
            .map(str::trim)
            .filter(|motivo| !motivo.is_empty())
            .map(str::to_string);

        saida.push(ValidationNote {
            chave,
            origem,
            valor,
            status,
            tag,
            motivo,
        });
    }

    saida
}
