use super::common::*;
use crate::workflows::elegibilidade::Faixa;

#[test]
fn cliente_forte_recebe_faixa_g() {
    let resultado = engine().avaliar("123", bureau(850), faturamento(1_200_000), bom_pagador(0.95));

    assert!(resultado.aprovado);
    assert_eq!(resultado.faixa_sugerida, Faixa::G);
    assert!(resultado.motivos[0].contains("faixa G"));
}

#[test]
fn faixa_m_com_bom_pagador_alto_sobe_para_g() {
    let resultado = engine().avaliar("123", bureau(650), faturamento(150_000), bom_pagador(0.95));

    assert!(resultado.aprovado);
    assert_eq!(resultado.faixa_sugerida, Faixa::G);
    assert!(resultado
        .motivos
        .iter()
        .any(|motivo| motivo.contains("nivel superior")));
}

#[test]
fn faixa_p_com_bom_pagador_alto_sobe_para_m() {
    let resultado = engine().avaliar("123", bureau(450), faturamento(20_000), bom_pagador(0.92));

    assert_eq!(resultado.faixa_sugerida, Faixa::M);
}

#[test]
fn faixa_g_nunca_sobe_alem_de_g() {
    let resultado = engine().avaliar("123", bureau(900), faturamento(2_000_000), bom_pagador(0.99));

    assert_eq!(resultado.faixa_sugerida, Faixa::G);
    assert!(resultado
        .motivos
        .iter()
        .all(|motivo| !motivo.contains("nivel superior")));
}

#[test]
fn bom_pagador_intermediario_registra_motivo_sem_promover() {
    let resultado = engine().avaliar("123", bureau(650), faturamento(150_000), bom_pagador(0.75));

    assert_eq!(resultado.faixa_sugerida, Faixa::M);
    assert!(resultado
        .motivos
        .iter()
        .any(|motivo| motivo.contains("politica de credito")));
}

#[test]
fn sem_criterios_minimos_recusa() {
    let resultado = engine().avaliar("123", bureau(300), faturamento(5_000), bom_pagador(0.80));

    assert!(!resultado.aprovado);
    assert_eq!(resultado.faixa_sugerida, Faixa::Recusado);
    assert!(resultado.motivos[0].contains("criterios minimos"));
}

#[test]
fn bom_pagador_abaixo_do_minimo_domina_qualquer_score() {
    for (score, total) in [(850, 1_200_000), (650, 150_000), (450, 20_000)] {
        let resultado = engine().avaliar("123", bureau(score), faturamento(total), bom_pagador(0.40));

        assert!(!resultado.aprovado);
        assert_eq!(resultado.faixa_sugerida, Faixa::Recusado);
        assert!(resultado.motivos[0].contains("recusado em qualquer operacao"));
    }
}

#[test]
fn limites_exatos_qualificam_um_abaixo_nao() {
    // Exactly at the G floor qualifies on both axes.
    let exato = engine().avaliar("123", bureau(800), faturamento(1_000_000), bom_pagador(0.60));
    assert_eq!(exato.faixa_sugerida, Faixa::G);

    // One unit below on either axis drops to the next tier.
    let score_abaixo = engine().avaliar("123", bureau(799), faturamento(1_000_000), bom_pagador(0.60));
    assert_eq!(score_abaixo.faixa_sugerida, Faixa::M);

    let faturamento_abaixo =
        engine().avaliar("123", bureau(800), faturamento(999_999), bom_pagador(0.60));
    assert_eq!(faturamento_abaixo.faixa_sugerida, Faixa::M);

    // The good-payer floor is inclusive as well: exactly 50% passes.
    let minimo = engine().avaliar("123", bureau(450), faturamento(20_000), bom_pagador(0.50));
    assert!(minimo.aprovado);
}

#[test]
fn upgrade_nunca_rebaixa_a_faixa() {
    for percentual in [0.55, 0.70, 0.90, 0.99] {
        let base = engine().avaliar("123", bureau(650), faturamento(150_000), bom_pagador(0.55));
        let com_upgrade =
            engine().avaliar("123", bureau(650), faturamento(150_000), bom_pagador(percentual));

        let ordem = |faixa: Faixa| match faixa {
            Faixa::Recusado => 0,
            Faixa::P => 1,
            Faixa::M => 2,
            Faixa::G => 3,
        };
        assert!(ordem(com_upgrade.faixa_sugerida) >= ordem(base.faixa_sugerida));
    }
}

#[test]
fn mesmo_cliente_produz_motivos_identicos() {
    let primeira = engine().avaliar("123", bureau(650), faturamento(150_000), bom_pagador(0.95));
    let segunda = engine().avaliar("123", bureau(650), faturamento(150_000), bom_pagador(0.95));

    assert_eq!(primeira, segunda);
}
