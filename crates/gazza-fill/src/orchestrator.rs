//! Walks a compile request through the publishing form, one field at a
//! time, and reports what happened to each.

use crate::driver::PageDriver;
use crate::injector::{FillPolicy, Injector, TextWrite};
use crate::marketplace::MarketplaceProfile;
use crate::notify::{self, ToastCategory};
use crate::outcome::{CompileReport, ControlKind, FieldOutcome, FieldReport, ScriptOutcome};
use crate::{Error, Result};
use gazza_core::listing::ListingField;
use gazza_core::protocol::{CompileRequest, InjectionResult};
use std::sync::atomic::{AtomicBool, Ordering};

/// In-page copy shown when a pass lands.
const SUCCESS_TOAST: &str = "✅ Form compilato! Verifica e pubblica.";

/// Exactly one pass runs at a time; a request arriving mid-pass is
/// rejected rather than interleaved into the same form.
pub struct FormCompiler<'a, D: PageDriver> {
    driver: &'a D,
    policy: FillPolicy,
    compiling: AtomicBool,
}

impl<'a, D: PageDriver> FormCompiler<'a, D> {
    pub fn new(driver: &'a D, policy: FillPolicy) -> Self {
        FormCompiler {
            driver,
            policy,
            compiling: AtomicBool::new(false),
        }
    }

    /// Run one pass. The marketplace is validated before the page is
    /// touched at all.
    pub async fn compile(&self, request: &CompileRequest) -> CompileReport {
        let profile = match crate::marketplace::profile_for(&request.marketplace) {
            Ok(profile) => profile,
            Err(err) => {
                return CompileReport {
                    marketplace: request.marketplace.clone(),
                    result: InjectionResult::fail(err.to_string()),
                    fields: Vec::new(),
                };
            }
        };

        if self.compiling.swap(true, Ordering::SeqCst) {
            return CompileReport {
                marketplace: request.marketplace.clone(),
                result: InjectionResult::fail(Error::Busy.to_string()),
                fields: Vec::new(),
            };
        }

        let report = self.run_pass(profile, request).await;
        self.compiling.store(false, Ordering::SeqCst);
        report
    }

    async fn run_pass(
        &self,
        profile: &MarketplaceProfile,
        request: &CompileRequest,
    ) -> CompileReport {
        let injector = Injector::new(self.driver, &self.policy);
        let mut fields = Vec::with_capacity(ListingField::ORDER.len());

        for field in ListingField::ORDER {
            let value = request
                .fields
                .get(field.key())
                .map(String::as_str)
                .filter(|v| !v.trim().is_empty());

            let Some(value) = value else {
                fields.push(FieldReport { field: field.key(), outcome: FieldOutcome::NotProvided });
                continue;
            };

            match self.inject_field(&injector, profile, field, value).await {
                Ok(outcome) => {
                    tracing::debug!("{field}: {outcome:?}");
                    fields.push(FieldReport { field: field.key(), outcome });
                }
                Err(err) => {
                    tracing::warn!("fill pass aborted at {field}: {err}");
                    let message = format!("❌ Errore: {err}");
                    if let Err(toast_err) =
                        notify::show_toast(self.driver, &message, ToastCategory::Error).await
                    {
                        tracing::debug!("error toast failed too: {toast_err}");
                    }
                    return CompileReport {
                        marketplace: request.marketplace.clone(),
                        result: InjectionResult::fail(err.to_string()),
                        fields,
                    };
                }
            }
        }

        if let Err(toast_err) =
            notify::show_toast(self.driver, SUCCESS_TOAST, ToastCategory::Success).await
        {
            tracing::debug!("success toast failed: {toast_err}");
        }

        CompileReport {
            marketplace: request.marketplace.clone(),
            result: InjectionResult::ok(),
            fields,
        }
    }

    async fn inject_field(
        &self,
        injector: &Injector<'_, D>,
        profile: &MarketplaceProfile,
        field: ListingField,
        value: &str,
    ) -> Result<FieldOutcome> {
        let Some(chain) = profile.selectors.chain(field) else {
            return Ok(FieldOutcome::ElementNotFound);
        };

        let Some(kind) = injector.classify(chain).await? else {
            return Ok(FieldOutcome::ElementNotFound);
        };

        match kind {
            ControlKind::Input | ControlKind::Textarea | ControlKind::Editable => {
                match injector.inject_text(chain, value, kind).await? {
                    TextWrite::Written { verified } => Ok(FieldOutcome::Filled { verified }),
                    TextWrite::Gone => Ok(FieldOutcome::ElementNotFound),
                }
            }
            ControlKind::Select => match injector.select_native(chain, value).await? {
                ScriptOutcome::Selected { label } => Ok(FieldOutcome::Selected { label }),
                ScriptOutcome::Already { label } => Ok(FieldOutcome::AlreadySet { label }),
                ScriptOutcome::NoOption { .. } => Ok(FieldOutcome::NoMatchingOption),
                ScriptOutcome::NotFound => Ok(FieldOutcome::ElementNotFound),
                other => Err(Error::Protocol(format!("unexpected select reply: {other:?}"))),
            },
            ControlKind::Widget => match injector.select_widget(chain, value).await? {
                ScriptOutcome::Picked { label } => Ok(FieldOutcome::Selected { label }),
                ScriptOutcome::NoOption { scanned } => {
                    tracing::debug!("widget for {field} matched none of {scanned} options");
                    Ok(FieldOutcome::WidgetLeftOpen)
                }
                ScriptOutcome::NotFound => Ok(FieldOutcome::ElementNotFound),
                other => Err(Error::Protocol(format!("unexpected widget reply: {other:?}"))),
            },
        }
    }
}
