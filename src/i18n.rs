//! French/Arabic string table and the current-language provider.
//!
//! Lookup is a plain dictionary: an unknown key is returned unchanged so a
//! missing translation shows up as its key instead of an empty label.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    Ar,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::Ar => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "fr" => Some(Language::Fr),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }

    /// Arabic renders right-to-left.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }

    pub fn other(&self) -> Self {
        match self {
            Language::Fr => Language::Ar,
            Language::Ar => Language::Fr,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// (key, fr, ar)
const TABLE: &[(&str, &str, &str)] = &[
    // Catalog
    ("our_products_title", "Nos Produits", "منتجاتنا"),
    ("all_categories", "Toutes les catégories", "كل الفئات"),
    ("newest_first", "Plus récents", "الأحدث أولاً"),
    ("price_low_high", "Prix : du moins cher au plus cher", "السعر: من الأقل إلى الأعلى"),
    ("price_high_low", "Prix : du plus cher au moins cher", "السعر: من الأعلى إلى الأقل"),
    ("name_az", "Nom A-Z", "الاسم أ-ي"),
    ("no_products_found", "Aucun produit trouvé", "لا توجد منتجات"),
    ("try_adjusting_filters", "Essayez de modifier votre recherche ou vos filtres", "جرّب تعديل البحث أو المرشحات"),
    ("reviews_title", "Avis des Clients", "آراء العملاء"),
    ("no_reviews", "Aucun avis pour le moment.", "لا توجد مراجعات بعد."),
    // Cart
    ("added_to_cart", "Ajouté au panier !", "تمت الإضافة إلى السلة!"),
    ("shopping_cart_title", "Panier", "سلة التسوق"),
    ("your_cart_is_empty", "Votre panier est vide", "سلتك فارغة"),
    ("add_products_to_get_started", "Ajoutez des produits pour commencer !", "أضف بعض المنتجات للبدء!"),
    ("clear_cart_button", "Vider le panier", "إفراغ السلة"),
    ("proceed_to_checkout_button", "Passer à la caisse", "المتابعة للدفع"),
    ("total_label", "Total:", "الإجمالي:"),
    // Product detail
    ("no_image_available", "Pas d'image disponible", "لا توجد صورة متاحة"),
    ("size_heading", "Taille", "الحجم"),
    ("color_heading", "Couleur", "اللون"),
    ("quantity_heading", "Quantité", "الكمية"),
    ("in_stock_message", "✓ En Stock (", "✓ متوفر ("),
    ("available_text", "disponible)", "متاح)"),
    ("out_of_stock_message", "✗ Rupture de stock", "✗ غير متوفر"),
    ("proceed_to_order_button", "Procéder à la commande", "المتابعة للطلب"),
    ("product_name_default", "Produit", "منتج"),
    // Checkout
    ("checkout_details_title", "Détails de la commande", "تفاصيل الدفع"),
    ("review_order_title", "Vérifier la commande", "مراجعة الطلب"),
    ("order_confirmed_title", "Commande Confirmée", "تم تأكيد الطلب"),
    ("name_required_error", "Le nom est obligatoire", "الاسم مطلوب"),
    ("phone_required_error", "Le numéro de téléphone est obligatoire", "رقم الهاتف مطلوب"),
    ("address_required_error", "L'adresse est obligatoire", "العنوان مطلوب"),
    ("city_required_error", "La ville est obligatoire", "المدينة مطلوبة"),
    ("state_required_error", "L'état/la province est obligatoire", "الولاية/المقاطعة مطلوبة"),
    ("postal_code_required_error", "Le code postal est obligatoire", "الرمز البريدي مطلوب"),
    ("country_required_error", "Le pays est obligatoire", "البلد مطلوب"),
    ("qty_label", "Qté", "الكمية"),
    ("total_amount_label", "Montant Total :", "المبلغ الإجمالي:"),
    ("back_to_details", "Retour aux détails", "العودة للتفاصيل"),
    ("place_order_button", "Passer la Commande", "تأكيد الطلب"),
    ("placing_order_button", "Commande en cours...", "جارٍ تقديم الطلب..."),
    ("order_success_title", "Merci pour votre commande !", "شكرا لطلبك!"),
    ("order_id_label", "ID de commande", "معرف الطلب"),
    ("failed_to_create_order", "Échec de création de la commande. Veuillez réessayer.", "فشل إنشاء الطلب. يرجى المحاولة مرة أخرى."),
    ("continue_shopping", "Continuer mes achats", "متابعة التسوق"),
    // Contact
    ("contact_heading", "Contact", "تواصل"),
    ("contact_send", "Envoyer", "إرسال"),
    ("contact_sending", "Envoi en cours...", "جارٍ الإرسال..."),
    ("contact_success", "Message envoyé avec succès ! Nous vous contacterons bientôt.", "تم إرسال الرسالة بنجاح! سنتواصل معك قريبًا."),
    ("contact_error", "Échec de l'envoi. Veuillez réessayer.", "فشل الإرسال. يرجى المحاولة مرة أخرى."),
    ("contact_name_required_error", "Le nom est obligatoire", "الاسم مطلوب"),
    ("contact_message_required_error", "Le message est obligatoire", "الرسالة مطلوبة"),
];

fn table() -> &'static HashMap<&'static str, (&'static str, &'static str)> {
    static TABLE_INDEX: OnceLock<HashMap<&'static str, (&'static str, &'static str)>> =
        OnceLock::new();
    TABLE_INDEX.get_or_init(|| TABLE.iter().map(|&(k, fr, ar)| (k, (fr, ar))).collect())
}

/// Look up `key` in `lang`, echoing the key when it is not in the table.
pub fn translate<'k>(lang: Language, key: &'k str) -> &'k str {
    match table().get(key) {
        Some(&(fr, ar)) => match lang {
            Language::Fr => fr,
            Language::Ar => ar,
        },
        None => key,
    }
}

/// Holds the current language and resolves keys against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    pub fn new(lang: Language) -> Self {
        Self { lang }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn set_language(&mut self, lang: Language) {
        self.lang = lang;
    }

    /// Switch between French and Arabic.
    pub fn toggle(&mut self) -> Language {
        self.lang = self.lang.other();
        self.lang
    }

    pub fn is_rtl(&self) -> bool {
        self.lang.is_rtl()
    }

    pub fn t<'k>(&self, key: &'k str) -> &'k str {
        translate(self.lang, key)
    }
}
