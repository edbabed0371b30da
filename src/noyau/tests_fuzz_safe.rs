//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte certaines erreurs attendues (division par zéro, factorielle hors bornes, NaN/∞)
//! - invariant clé : tout succès est fini et son affichage se relit comme un nombre

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::eval::{evaluer, evaluer_detaille};
use super::expr::ModeAngle;
use super::lecture::lire_matrice;
use super::rpn::PROFONDEUR_MAX;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

/// Liste blanche : erreurs *normales* pour une expression bien formée.
fn is_erreur_attendue(e: &ErreurCalcul) -> bool {
    matches!(
        e,
        ErreurCalcul::DivisionParZero
            | ErreurCalcul::ResultatInvalide
            | ErreurCalcul::FactorielleNegative
            | ErreurCalcul::FactorielleTropGrande
    )
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(7) {
        0 => format!("{}", rng.pick(10)),
        1 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        2 => "pi".to_string(),
        3 => "π".to_string(),
        4 => "e".to_string(),
        5 => format!("{}!", rng.pick(12)),
        _ => "0".to_string(), // zéros fréquents : division / reste
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(12) {
        0 => a,
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}*{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}/{})", gen_expr(rng, depth - 1)),
        5 => format!("({a}%{})", gen_expr(rng, depth - 1)),
        6 => format!("({a}^{})", gen_expr(rng, depth - 1)),
        7 => format!("(-{a})"),
        8 => format!("({a})!"),
        _ => {
            let f = ["sin", "cos", "tan", "sqrt", "log", "ln", "exp"][rng.pick(7) as usize];
            format!("{f}({a})")
        }
    }
}

/// Texte quelconque sur un alphabet proche de la calculatrice.
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: [&str; 24] = [
        "1", "2", "0", ".", "+", "-", "*", "/", "%", "^", "!", "(", ")", " ", "e", "pi", "sin",
        "sqrt(", "×", "÷", "√", "ans", "&", "x",
    ];
    let n = 1 + rng.pick(24);
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = if rng.coin() {
            ModeAngle::Degres
        } else {
            ModeAngle::Radians
        };

        match evaluer_detaille(&expr, mode, None) {
            Ok(ev) => {
                assert!(ev.valeur.is_finite(), "expr={expr:?} valeur={}", ev.valeur);
                assert!(
                    ev.affichage.parse::<f64>().is_ok(),
                    "affichage illisible: expr={expr:?} aff={}",
                    ev.affichage
                );
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e:?}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let campagne = |seed: u64| -> Vec<Result<String, ErreurCalcul>> {
        let mut rng = Rng::new(seed);
        (0..150)
            .map(|_| {
                let expr = gen_expr(&mut rng, 3);
                evaluer_detaille(&expr, ModeAngle::Degres, None).map(|ev| ev.affichage)
            })
            .collect()
    };
    assert_eq!(campagne(0xBADC0DE_u64), campagne(0xBADC0DE_u64));
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..2000 {
        budget(t0, max);

        let s = gen_bruit(&mut rng);
        // seul compte : un résultat fini ou une erreur classée
        if let Ok(v) = evaluer(&s, ModeAngle::Degres) {
            assert!(v.is_finite(), "s={s:?} v={v}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = somme_balancee("1/2", 800);
    let v = evaluer(&expr, ModeAngle::Degres).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(v, 400.0);
}

#[test]
fn fuzz_safe_profondeur_bornee() {
    // juste sous la limite : accepté
    let s = format!("{}1", "-".repeat(PROFONDEUR_MAX - 2));
    assert_eq!(evaluer(&s, ModeAngle::Degres).unwrap(), 1.0);

    // au-delà : refus propre, pas de débordement de pile
    let s = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    assert!(evaluer(&s, ModeAngle::Degres).is_ok());
    let s = format!("{}1", "-".repeat(50_000));
    assert!(matches!(
        evaluer(&s, ModeAngle::Degres),
        Err(ErreurCalcul::SyntaxeInvalide(_))
    ));
    let s = format!("{}2", "sqrt(".repeat(5000)) + &")".repeat(5000);
    assert!(matches!(
        evaluer(&s, ModeAngle::Degres),
        Err(ErreurCalcul::SyntaxeInvalide(_))
    ));
}

#[test]
fn fuzz_safe_inverses_aleatoires() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0x3A7_u64);

    for _ in 0..100 {
        budget(t0, max);

        let n = 1 + rng.pick(4) as usize;
        let texte: Vec<String> = (0..n)
            .map(|_| {
                (0..n)
                    .map(|_| format!("{}", rng.pick(7) as i32 - 3))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        let a = lire_matrice(&texte.join(";")).unwrap();

        match a.inverse() {
            Ok(inv) => {
                let p = a.produit(&inv).unwrap();
                for i in 0..n {
                    for j in 0..n {
                        let attendu = if i == j { 1.0 } else { 0.0 };
                        assert!(
                            (p.get(i, j) - attendu).abs() < 1e-6,
                            "A·A⁻¹ ≠ I pour {texte:?}"
                        );
                    }
                }
            }
            Err(e) => {
                assert_eq!(e, ErreurCalcul::MatriceSinguliere);
                assert!(a.determinant().unwrap().abs() < 1e-6, "{texte:?}");
            }
        }
    }
}
