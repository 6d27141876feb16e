use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Field, Fields, Ident, ItemStruct, LitInt, Type};

/// Generates a length-gated extractor for a formatted SMBIOS section.
///
/// Every field is read in declaration order, little-endian, starting at offset 0 of the
/// formatted section (header stripped). `#[smbios(since = N)]` names the minimum section
/// length of the revision that introduced the field: the field is read only when the section
/// is at least `N` bytes long and keeps its zero value otherwise.
///
/// Generated items:
/// - `MIN_LENGTH`: the smallest `since` in the struct.
/// - `TIERS`: the distinct `since` values in ascending order.
/// - `tier_for_length(len)`: the largest tier satisfied by `len`.
/// - `from_formatted(body)`: the extractor. It never reads past `body.len()`.
/// - one getter per field.
#[proc_macro_derive(SMBIOS, attributes(smbios))]
pub fn smbios_record(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as ItemStruct);

    match expand(&ast) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(ast: &ItemStruct) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &ast.ident;

    let fields = match &ast.fields {
        Fields::Named(fields) => &fields.named,
        _ => {
            return Err(syn::Error::new_spanned(
                ast,
                "SMBIOS derive needs a struct with named fields",
            ))
        }
    };

    let mut offset = 0usize;
    let mut tiers: Vec<usize> = vec![];
    let mut field_getters = vec![];
    let mut field_names = vec![];
    let mut field_ctors = vec![];
    for field in fields {
        let func_name = field_ident(field)?;
        field_names.push(func_name.clone());

        let ty = &field.ty;
        let tydef = get_type_def(ty)?;
        let since = get_since(field)?;

        if let Some(&last) = tiers.last() {
            if since < last {
                return Err(syn::Error::new_spanned(
                    field,
                    format!(
                        "Field `{}` belongs to tier {} but follows tier {}",
                        func_name, since, last
                    ),
                ));
            }
        }
        if tiers.last() != Some(&since) {
            tiers.push(since);
        }

        let start = offset;
        let end = offset + tydef.byte_size;
        if end > since {
            return Err(syn::Error::new_spanned(
                field,
                format!(
                    "Field `{}` spans bytes {}..{} which do not fit in tier {}",
                    func_name, start, end, since
                ),
            ));
        }
        offset = end;

        field_getters.push(quote! {
            pub fn #func_name(&self) -> #ty {
                self.#func_name
            }
        });

        field_ctors.push(field_ctor(&func_name, &tydef, since, start, end));
    }

    let min_length = tiers.first().copied().unwrap_or(0);

    let struct_impl = quote! {
        impl #struct_name {
            pub const MIN_LENGTH: usize = #min_length;

            pub const TIERS: &'static [usize] = &[#(#tiers),*];

            pub fn tier_for_length(len: usize) -> Option<usize> {
                Self::TIERS.iter().rev().find(|t| len >= **t).copied()
            }

            #(#field_getters)*

            pub fn from_formatted(body: &[u8]) -> Self {
                let len = body.len();

                #(#field_ctors)*

                #struct_name {
                    #(#field_names),*
                }
            }
        }
    };

    Ok(struct_impl)
}

#[derive(Debug)]
struct TypeDef {
    method: Ident,
    byte_size: usize,
}

fn field_ident(field: &Field) -> syn::Result<Ident> {
    field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "SMBIOS derive needs named fields"))
}

fn field_ctor(
    func_name: &Ident,
    tydef: &TypeDef,
    since: usize,
    start: usize,
    end: usize,
) -> proc_macro2::TokenStream {
    let method = &tydef.method;

    quote! {
        let #func_name = if len >= #since {
            let mut cursor = &body[#start..#end];
            ::bytes::Buf::#method(&mut cursor)
        } else {
            0
        };
    }
}

fn get_since(field: &Field) -> syn::Result<usize> {
    let mut since = None;

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("smbios")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("since") {
                let value: LitInt = meta.value()?.parse()?;
                since = Some(value.base10_parse::<usize>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported smbios attribute"))
            }
        })?;
    }

    since.ok_or_else(|| {
        syn::Error::new_spanned(
            field,
            "Need Attribute `since` to Field, e.g. #[smbios(since = 17)]",
        )
    })
}

fn get_type_def(ty: &Type) -> syn::Result<TypeDef> {
    let ident = match ty {
        Type::Path(p) => p.path.get_ident(),
        _ => None,
    };

    let (method, byte_size) = match ident.map(|i| i.to_string()).as_deref() {
        Some("u8") => ("get_u8", 1),
        Some("u16") => ("get_u16_le", 2),
        Some("u32") => ("get_u32_le", 4),
        Some("u64") => ("get_u64_le", 8),
        Some("i8") => ("get_i8", 1),
        Some("i16") => ("get_i16_le", 2),
        Some("i32") => ("get_i32_le", 4),
        Some("i64") => ("get_i64_le", 8),
        _ => {
            return Err(syn::Error::new_spanned(
                ty,
                "Not supported yet. Only fixed-width integers can be extracted",
            ))
        }
    };

    Ok(TypeDef {
        method: Ident::new(method, proc_macro2::Span::call_site()),
        byte_size,
    })
}
