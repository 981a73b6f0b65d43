use chrono::NaiveDate;

use crate::workflows::elegibilidade::{
    BomPagadorData, BureauData, EligibilityConfig, EligibilityEngine, FaturamentoData,
    FaturamentoMes,
};

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityConfig::default())
}

pub(super) fn bureau(score: u32) -> BureauData {
    BureauData {
        score,
        last_update: NaiveDate::from_ymd_opt(2026, 8, 1).expect("data valida"),
    }
}

pub(super) fn faturamento(total_atual: u64) -> FaturamentoData {
    let historico = ["mar", "abr", "mai", "jun", "jul", "ago"]
        .into_iter()
        .map(|mes| FaturamentoMes {
            mes: mes.to_string(),
            valor: total_atual,
        })
        .collect();

    FaturamentoData {
        total_atual,
        media_6m: total_atual,
        percentual_meta: 100,
        historico,
    }
}

pub(super) fn bom_pagador(percentual_pago: f64) -> BomPagadorData {
    let divida_total = 100_000;
    BomPagadorData {
        divida_total,
        valor_pago: (divida_total as f64 * percentual_pago).round() as u64,
        percentual_pago,
    }
}
