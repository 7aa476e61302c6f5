//! Built-in catalog reference data (net prices, EUR).

use super::{CatalogCategory, CatalogItem, CatalogPack, CatalogSubcategory};
use rust_decimal::Decimal;

fn eur(value: i64) -> Option<Decimal> {
    Some(Decimal::from(value))
}

pub(super) fn categories() -> Vec<CatalogCategory> {
    vec![
        CatalogCategory {
            id: "sites-web",
            label: "Sites web",
        },
        CatalogCategory {
            id: "referencement",
            label: "Référencement",
        },
        CatalogCategory {
            id: "identite",
            label: "Identité visuelle",
        },
        CatalogCategory {
            id: "maintenance",
            label: "Maintenance & accompagnement",
        },
    ]
}

pub(super) fn subcategories() -> Vec<CatalogSubcategory> {
    vec![
        CatalogSubcategory {
            id: "site-vitrine",
            category_id: "sites-web",
            label: "Sites vitrines",
        },
        CatalogSubcategory {
            id: "site-ecommerce",
            category_id: "sites-web",
            label: "Sites e-commerce",
        },
        CatalogSubcategory {
            id: "seo",
            category_id: "referencement",
            label: "SEO",
        },
        CatalogSubcategory {
            id: "fiche-etablissement",
            category_id: "referencement",
            label: "Fiche d'établissement",
        },
        CatalogSubcategory {
            id: "branding",
            category_id: "identite",
            label: "Branding",
        },
        CatalogSubcategory {
            id: "supports",
            category_id: "identite",
            label: "Supports imprimés",
        },
        CatalogSubcategory {
            id: "forfaits-mensuels",
            category_id: "maintenance",
            label: "Forfaits mensuels",
        },
    ]
}

pub(super) fn items() -> Vec<CatalogItem> {
    vec![
        CatalogItem {
            id: "site-vitrine-essentiel",
            name: "Site vitrine essentiel",
            subtitle: "Site 1 à 3 pages, design sur mesure",
            description: "Site vitrine responsive avec formulaire de contact et mentions légales.",
            category_id: "sites-web",
            subcategory_id: "site-vitrine",
            unit_price: eur(890),
            price_unit: "",
            popular: true,
            delay: "2 à 3 semaines",
            deliverables: &["Maquette", "Intégration responsive", "Formulaire de contact", "Mise en ligne"],
            note: "",
        },
        CatalogItem {
            id: "site-vitrine-premium",
            name: "Site vitrine premium",
            subtitle: "Jusqu'à 8 pages, animations et blog",
            description: "Site vitrine complet avec blog, animations et optimisation des performances.",
            category_id: "sites-web",
            subcategory_id: "site-vitrine",
            unit_price: eur(1690),
            price_unit: "",
            popular: false,
            delay: "4 à 6 semaines",
            deliverables: &["Maquette", "Blog", "Animations", "Optimisation performances"],
            note: "",
        },
        CatalogItem {
            id: "page-supplementaire",
            name: "Page supplémentaire",
            subtitle: "Page additionnelle sur site existant",
            description: "Conception et intégration d'une page supplémentaire.",
            category_id: "sites-web",
            subcategory_id: "site-vitrine",
            unit_price: eur(120),
            price_unit: "/page",
            popular: false,
            delay: "2 à 4 jours",
            deliverables: &["Maquette", "Intégration"],
            note: "",
        },
        CatalogItem {
            id: "boutique-ecommerce",
            name: "Boutique e-commerce",
            subtitle: "Catalogue produits et paiement en ligne",
            description: "Boutique en ligne avec gestion du catalogue, panier et paiement sécurisé.",
            category_id: "sites-web",
            subcategory_id: "site-ecommerce",
            unit_price: eur(2900),
            price_unit: "",
            popular: true,
            delay: "6 à 8 semaines",
            deliverables: &["Catalogue produits", "Paiement en ligne", "Gestion des stocks", "Formation"],
            note: "Jusqu'à 100 produits importés.",
        },
        CatalogItem {
            id: "migration-ecommerce",
            name: "Migration de boutique",
            subtitle: "Reprise d'une boutique existante",
            description: "Migration de catalogue, clients et commandes depuis une autre plateforme.",
            category_id: "sites-web",
            subcategory_id: "site-ecommerce",
            unit_price: None,
            price_unit: "",
            popular: false,
            delay: "-",
            deliverables: &["Audit de l'existant", "Plan de migration"],
            note: "Sur devis après audit de la boutique existante.",
        },
        CatalogItem {
            id: "audit-seo",
            name: "Audit SEO",
            subtitle: "Analyse technique et sémantique",
            description: "Audit complet du site : technique, contenu, popularité, avec plan d'action priorisé.",
            category_id: "referencement",
            subcategory_id: "seo",
            unit_price: eur(450),
            price_unit: "",
            popular: true,
            delay: "1 semaine",
            deliverables: &["Rapport d'audit", "Plan d'action priorisé", "Restitution 1h"],
            note: "",
        },
        CatalogItem {
            id: "seo-mensuel",
            name: "Accompagnement SEO",
            subtitle: "Suivi et optimisation continue",
            description: "Optimisation continue : contenus, netlinking, suivi de positions.",
            category_id: "referencement",
            subcategory_id: "seo",
            unit_price: eur(390),
            price_unit: "/mois",
            popular: false,
            delay: "-",
            deliverables: &["2 contenus optimisés", "Rapport mensuel", "Suivi de positions"],
            note: "Engagement 6 mois minimum.",
        },
        CatalogItem {
            id: "fiche-google",
            name: "Optimisation fiche d'établissement",
            subtitle: "Fiche Google complète et optimisée",
            description: "Création ou reprise de la fiche, photos, horaires, posts et avis.",
            category_id: "referencement",
            subcategory_id: "fiche-etablissement",
            unit_price: eur(290),
            price_unit: "",
            popular: true,
            delay: "1 semaine",
            deliverables: &["Fiche vérifiée", "Photos optimisées", "Guide de gestion des avis"],
            note: "",
        },
        CatalogItem {
            id: "logo-identite",
            name: "Création de logo",
            subtitle: "Logo et déclinaisons",
            description: "Trois pistes créatives, déclinaisons couleur et noir et blanc, fichiers sources.",
            category_id: "identite",
            subcategory_id: "branding",
            unit_price: eur(590),
            price_unit: "",
            popular: false,
            delay: "2 semaines",
            deliverables: &["3 pistes créatives", "Fichiers sources", "Mini charte d'usage"],
            note: "",
        },
        CatalogItem {
            id: "charte-graphique",
            name: "Charte graphique",
            subtitle: "Identité visuelle complète",
            description: "Logo, palette, typographies, règles d'usage et gabarits de base.",
            category_id: "identite",
            subcategory_id: "branding",
            unit_price: eur(1290),
            price_unit: "",
            popular: false,
            delay: "3 à 4 semaines",
            deliverables: &["Logo", "Palette et typographies", "Document de charte"],
            note: "",
        },
        CatalogItem {
            id: "carte-visite",
            name: "Cartes de visite",
            subtitle: "Conception du fichier d'impression",
            description: "Design recto-verso prêt à imprimer, impression non incluse.",
            category_id: "identite",
            subcategory_id: "supports",
            unit_price: eur(90),
            price_unit: "",
            popular: false,
            delay: "3 jours",
            deliverables: &["Fichier HD prêt à imprimer"],
            note: "",
        },
        CatalogItem {
            id: "maintenance-essentielle",
            name: "Maintenance essentielle",
            subtitle: "Mises à jour et sauvegardes",
            description: "Mises à jour mensuelles, sauvegardes et surveillance de disponibilité.",
            category_id: "maintenance",
            subcategory_id: "forfaits-mensuels",
            unit_price: eur(49),
            price_unit: "/mois",
            popular: true,
            delay: "-",
            deliverables: &["Mises à jour", "Sauvegardes hebdomadaires", "Surveillance 24/7"],
            note: "",
        },
        CatalogItem {
            id: "maintenance-plus",
            name: "Maintenance plus",
            subtitle: "Maintenance et évolutions",
            description: "Maintenance essentielle plus 2h d'évolutions par mois.",
            category_id: "maintenance",
            subcategory_id: "forfaits-mensuels",
            unit_price: eur(129),
            price_unit: "/mois",
            popular: false,
            delay: "-",
            deliverables: &["Maintenance essentielle", "2h d'évolutions", "Support prioritaire"],
            note: "",
        },
    ]
}

pub(super) fn packs() -> Vec<CatalogPack> {
    vec![
        CatalogPack {
            id: "pack-vitrine-seo",
            name: "Site vitrine + SEO",
            subtitle: "Lancement web complet",
            includes: &[
                "Site vitrine essentiel",
                "Audit SEO",
                "Optimisation fiche d'établissement",
            ],
            price: Decimal::from(1200),
            price_label: "1 200 € HT",
            popular: true,
            agency_only: false,
            savings: "430 € par rapport aux prestations séparées",
            ideal_for: "Artisans et commerces qui démarrent leur présence en ligne",
        },
        CatalogPack {
            id: "pack-identite-web",
            name: "Identité + Site premium",
            subtitle: "Image de marque de A à Z",
            includes: &[
                "Charte graphique",
                "Site vitrine premium",
                "Cartes de visite",
            ],
            price: Decimal::from(2590),
            price_label: "2 590 € HT",
            popular: false,
            agency_only: false,
            savings: "480 € par rapport aux prestations séparées",
            ideal_for: "Entreprises en création ou en refonte d'image",
        },
        CatalogPack {
            id: "pack-visibilite",
            name: "Visibilité locale",
            subtitle: "Être trouvé près de chez soi",
            includes: &[
                "Optimisation fiche d'établissement",
                "Audit SEO",
                "3 mois d'accompagnement SEO",
            ],
            price: Decimal::from(1590),
            price_label: "1 590 € HT",
            popular: false,
            agency_only: false,
            savings: "320 € par rapport aux prestations séparées",
            ideal_for: "Commerces de proximité déjà équipés d'un site",
        },
        CatalogPack {
            id: "pack-agence-marque-blanche",
            name: "Forfait marque blanche",
            subtitle: "Production en sous-traitance",
            includes: &[
                "5 sites vitrines essentiels",
                "Support technique dédié",
            ],
            price: Decimal::from(3900),
            price_label: "3 900 € HT",
            popular: false,
            agency_only: true,
            savings: "",
            ideal_for: "Agences partenaires",
        },
    ]
}
