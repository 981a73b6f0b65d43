use super::domain::{NotaStatus, StatusTolerancia, ValidationNote, ValidationSummary};

/// Derives the batch totals and the tolerance verdict. Pure function of
/// `(notas, tolerancia, valor_solicitado)`; pending notes count toward the
/// total but toward neither the valid nor the invalid bucket.
pub fn calcular_resumo(
    notas: &[ValidationNote],
    tolerancia: f64,
    valor_solicitado: u64,
) -> ValidationSummary {
    let validas = notas
        .iter()
        .filter(|nota| nota.status == NotaStatus::Validada)
        .count();
    let invalidas = notas
        .iter()
        .filter(|nota| nota.status == NotaStatus::Recusada)
        .count();
    let valor_total_validas: u64 = notas
        .iter()
        .filter(|nota| nota.status == NotaStatus::Validada)
        .map(|nota| nota.valor)
        .sum();

    let base = valor_solicitado.max(1) as f64;
    let percentual_valido = (valor_total_validas as f64 / base * 100.0).round() as u32;
    let diferenca_percentual =
        (valor_solicitado as f64 - valor_total_validas as f64).abs() / base * 100.0;

    let status = if diferenca_percentual <= tolerancia {
        StatusTolerancia::Dentro
    } else {
        StatusTolerancia::Fora
    };

    ValidationSummary {
        total_notas: notas.len(),
        validas,
        invalidas,
        tolerancia,
        percentual_valido,
        valor_total_validas,
        valor_solicitado,
        status,
    }
}
