use super::config::{EligibilityConfig, FaixaMinimos};
use super::domain::{BomPagadorData, BureauData, Faixa, FaturamentoData};

pub(crate) struct Classificacao {
    pub aprovado: bool,
    pub faixa: Faixa,
    pub motivos: Vec<String>,
}

/// Applies the tier rules in their fixed order: good-payer floor first,
/// then G -> M -> P (each tier with its own score + revenue pair, `>=` on
/// both), then the upgrade pass.
pub(crate) fn classificar(
    config: &EligibilityConfig,
    bureau: &BureauData,
    faturamento: &FaturamentoData,
    bom_pagador: &BomPagadorData,
) -> Classificacao {
    let mut motivos = Vec::new();
    let percentual_pago = bom_pagador.percentual_pago * 100.0;

    if percentual_pago < config.percentual_min {
        motivos.push(format!(
            "Percentual de dividas pagas inferior a {}% -> cliente recusado em qualquer operacao.",
            numero(config.percentual_min)
        ));
        return Classificacao {
            aprovado: false,
            faixa: Faixa::Recusado,
            motivos,
        };
    }

    let faixas = [
        (Faixa::G, &config.faixa_g),
        (Faixa::M, &config.faixa_m),
        (Faixa::P, &config.faixa_p),
    ];

    let mut faixa = None;
    for (candidata, minimos) in faixas {
        if atinge(bureau, faturamento, minimos) {
            motivos.push(format!(
                "Score >= {} e faturamento mensal >= {} -> faixa {}.",
                minimos.score,
                moeda(minimos.faturamento),
                candidata.label()
            ));
            faixa = Some(candidata);
            break;
        }
    }

    let Some(mut faixa) = faixa else {
        motivos.push("Cliente nao atingiu os criterios minimos para faixa P.".to_string());
        return Classificacao {
            aprovado: false,
            faixa: Faixa::Recusado,
            motivos,
        };
    };

    if percentual_pago >= config.upgrade_high && faixa != Faixa::G {
        motivos.push(format!(
            "Percentual de dividas pagas >= {}% -> cliente elegivel para emprestimo de nivel superior.",
            numero(config.upgrade_high)
        ));
        faixa = faixa.promover();
    } else if percentual_pago >= config.upgrade_medium {
        motivos.push(format!(
            "Percentual de dividas pagas >= {}% -> cliente aprovado na politica de credito.",
            numero(config.upgrade_medium)
        ));
    }

    Classificacao {
        aprovado: true,
        faixa,
        motivos,
    }
}

fn atinge(bureau: &BureauData, faturamento: &FaturamentoData, minimos: &FaixaMinimos) -> bool {
    bureau.score >= minimos.score && faturamento.total_atual >= minimos.faturamento
}

/// pt-BR currency rendering for whole-real amounts, e.g. `R$ 1.000.000,00`.
pub(crate) fn moeda(valor: u64) -> String {
    let digitos = valor.to_string();
    let mut agrupado = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, c) in digitos.chars().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(c);
    }
    format!("R$ {agrupado},00")
}

fn numero(valor: f64) -> String {
    if valor.fract() == 0.0 {
        format!("{}", valor as i64)
    } else {
        format!("{valor}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moeda_agrupa_milhares() {
        assert_eq!(moeda(0), "R$ 0,00");
        assert_eq!(moeda(950), "R$ 950,00");
        assert_eq!(moeda(10_000), "R$ 10.000,00");
        assert_eq!(moeda(1_000_000), "R$ 1.000.000,00");
    }

    #[test]
    fn numero_omite_fracao_inteira() {
        assert_eq!(numero(50.0), "50");
        assert_eq!(numero(12.5), "12.5");
    }
}
