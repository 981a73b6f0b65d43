//! Final decision ("parecer") recording: the human outcome of the
//! pre-analysis, with the checklist gate and the audit snapshot.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::sessao::EstadoProcesso;

/// Closing checklist conferred before an approval is recorded.
pub const CHECKLIST_ITENS: [&str; 5] = [
    "contrato",
    "documentos",
    "cadastro",
    "compliance",
    "assinaturas",
];

/// Human decision over the analyzed loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decisao {
    Aprovado,
    Ajustes,
    Reprovado,
}

impl Decisao {
    pub const fn label(self) -> &'static str {
        match self {
            Decisao::Aprovado => "Aprovar",
            Decisao::Ajustes => "Solicitar ajustes",
            Decisao::Reprovado => "Reprovar",
        }
    }
}

/// Request body for recording the final decision.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParecerRequest {
    pub decisao: Decisao,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub checklist: Option<BTreeMap<String, bool>>,
}

/// Recorded decision with its audit snapshot. Immutable once written;
/// replaced wholesale if a new process reaches the decision stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParecerRecord {
    pub decisao: Decisao,
    pub observacoes: String,
    pub checklist: BTreeMap<String, bool>,
    pub registrado_em: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<crate::workflows::elegibilidade::EligibilityResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validacao: Option<crate::workflows::validacao::ValidationResult>,
}

/// Gate failures for the decision stage.
#[derive(Debug, thiserror::Error)]
pub enum ParecerError {
    #[error("Processe um lote validado antes de registrar o parecer.")]
    SemLote,
    #[error("Conclua todos os itens do checklist antes de aprovar o emprestimo.")]
    ChecklistIncompleto { pendentes: Vec<String> },
}

/// Applies the decision rules against the current process state and
/// builds the audit record. An approval requires every checklist item
/// checked; adjustment and rejection decisions are not gated.
pub fn montar_parecer(
    request: ParecerRequest,
    estado: &EstadoProcesso,
    registrado_em: NaiveDateTime,
) -> Result<ParecerRecord, ParecerError> {
    let Some(validacao) = estado.validacao.clone() else {
        return Err(ParecerError::SemLote);
    };

    let informado = request.checklist.unwrap_or_default();
    let checklist: BTreeMap<String, bool> = CHECKLIST_ITENS
        .iter()
        .map(|item| {
            (
                item.to_string(),
                informado.get(*item).copied().unwrap_or(false),
            )
        })
        .collect();

    if request.decisao == Decisao::Aprovado {
        let pendentes: Vec<String> = checklist
            .iter()
            .filter(|(_, feito)| !**feito)
            .map(|(item, _)| item.clone())
            .collect();
        if !pendentes.is_empty() {
            return Err(ParecerError::ChecklistIncompleto { pendentes });
        }
    }

    let observacoes = request
        .observacoes
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    Ok(ParecerRecord {
        decisao: request.decisao,
        observacoes,
        checklist,
        registrado_em,
        eligibility: estado.eligibility.clone(),
        validacao: Some(validacao),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::workflows::validacao::{
        calcular_resumo, NotaStatus, Origem, TipoArquivo, ValidationNote, ValidationResult,
    };

    fn quando() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 7)
            .expect("data valida")
            .and_hms_opt(10, 30, 0)
            .expect("hora valida")
    }

    fn estado_com_lote() -> EstadoProcesso {
        let notas = vec![ValidationNote {
            chave: "111".to_string(),
            origem: Origem::Xml,
            valor: 145_000,
            status: NotaStatus::Validada,
            tag: "OK".to_string(),
            motivo: None,
        }];
        let summary = calcular_resumo(&notas, 15.0, 150_000);

        EstadoProcesso {
            eligibility: None,
            validacao: Some(ValidationResult {
                cliente_id: "12345678000190".to_string(),
                cliente_nome: None,
                nome_lote: Some("Recebiveis agosto".to_string()),
                tipo_arquivo: TipoArquivo::Xml,
                notas,
                summary,
                arquivos: None,
                eligibility: None,
            }),
            parecer: None,
        }
    }

    fn checklist_completo() -> BTreeMap<String, bool> {
        CHECKLIST_ITENS
            .iter()
            .map(|item| (item.to_string(), true))
            .collect()
    }

    #[test]
    fn sem_lote_validado_nao_ha_parecer() {
        let request = ParecerRequest {
            decisao: Decisao::Reprovado,
            observacoes: None,
            checklist: None,
        };

        let erro = montar_parecer(request, &EstadoProcesso::default(), quando())
            .expect_err("deve falhar");
        assert!(matches!(erro, ParecerError::SemLote));
    }

    #[test]
    fn aprovacao_exige_checklist_completo() {
        let mut checklist = checklist_completo();
        checklist.insert("assinaturas".to_string(), false);

        let request = ParecerRequest {
            decisao: Decisao::Aprovado,
            observacoes: None,
            checklist: Some(checklist),
        };

        match montar_parecer(request, &estado_com_lote(), quando()) {
            Err(ParecerError::ChecklistIncompleto { pendentes }) => {
                assert_eq!(pendentes, vec!["assinaturas".to_string()]);
            }
            other => panic!("esperava checklist incompleto, obtive {other:?}"),
        }
    }

    #[test]
    fn itens_ausentes_contam_como_pendentes() {
        let request = ParecerRequest {
            decisao: Decisao::Aprovado,
            observacoes: None,
            checklist: None,
        };

        match montar_parecer(request, &estado_com_lote(), quando()) {
            Err(ParecerError::ChecklistIncompleto { pendentes }) => {
                assert_eq!(pendentes.len(), CHECKLIST_ITENS.len());
            }
            other => panic!("esperava checklist incompleto, obtive {other:?}"),
        }
    }

    #[test]
    fn ajustes_e_reprovacao_nao_passam_pelo_checklist() {
        for decisao in [Decisao::Ajustes, Decisao::Reprovado] {
            let request = ParecerRequest {
                decisao,
                observacoes: Some("  rever garantias  ".to_string()),
                checklist: None,
            };

            let registro =
                montar_parecer(request, &estado_com_lote(), quando()).expect("parecer registrado");
            assert_eq!(registro.decisao, decisao);
            assert_eq!(registro.observacoes, "rever garantias");
        }
    }

    #[test]
    fn aprovacao_registra_snapshot_do_lote() {
        let request = ParecerRequest {
            decisao: Decisao::Aprovado,
            observacoes: None,
            checklist: Some(checklist_completo()),
        };

        let registro =
            montar_parecer(request, &estado_com_lote(), quando()).expect("parecer registrado");
        assert_eq!(registro.registrado_em, quando());
        assert!(registro.checklist.values().all(|feito| *feito));
        let lote = registro.validacao.expect("snapshot do lote");
        assert_eq!(lote.cliente_id, "12345678000190");
    }
}
